//! End-to-end tests over complete NITF articles.
//!
//! Covers parsing a real-world shaped article (with DOCTYPE), the text and
//! entity pipeline, search and export.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use nitf_reader::export::{render, to_markdown, DocumentSummary};
use nitf_reader::search::{count_occurrences, search};
use nitf_reader::{Document, ExportFormat, Link, MentionFilter, NitfError, ParseOptions, Query};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn storm() -> Document {
    Document::parse(&load_fixture("storm.xml")).expect("Failed to parse storm.xml")
}

#[test]
fn test_metadata() {
    let doc = storm();

    assert_eq!(doc.title(), Some("Storm leaves thousands without power"));
    assert_eq!(doc.headline(), Some("Storm Leaves Thousands Without Power"));
    assert_eq!(doc.subheadline(), Some("Crews expect repairs to take days"));
    assert_eq!(doc.doc_id(), Some("EXW-2024-0115-001"));
    assert_eq!(doc.byline(), Some("By Jane Smith, Staff Writer"));
    assert_eq!(doc.bylines()[0].title().as_deref(), Some("Staff Writer"));
    assert_eq!(doc.bylines()[0].people(), ["Jane Smith"]);

    let docdata = &doc.head.docdata;
    assert_eq!(docdata.urgency, Some(3));
    assert_eq!(docdata.date_issue.as_deref(), Some("20240115T103000-0500"));
    assert_eq!(docdata.date_release.as_deref(), Some("20240115T110000-0500"));
    assert_eq!(docdata.copyright_holder.as_deref(), Some("Example Wire"));
    assert_eq!(docdata.keywords, vec!["storm", "power outage"]);

    let pubdata = &doc.head.pubdata;
    assert_eq!(pubdata.edition.as_deref(), Some("Morning"));
    assert_eq!(pubdata.position_sequence.as_deref(), Some("1"));
    assert_eq!(pubdata.date_publication.as_deref(), Some("20240115"));

    assert_eq!(doc.head.subjects[0].matter.as_deref(), Some("Storms"));
    assert_eq!(doc.head.meta_value("source"), Some("Example Wire"));

    let dateline = doc.dateline().unwrap();
    assert_eq!(dateline.text, "PORTLAND, Maine, Jan. 15");
    assert_eq!(dateline.location.as_deref(), Some("PORTLAND"));
    assert_eq!(dateline.story_date.as_deref(), Some("Jan. 15"));

    assert_eq!(
        doc.body.head.abstract_text.as_deref(),
        Some("A winter storm cut power to thousands along the coast.")
    );
    assert_eq!(doc.body.head.distributor.as_deref(), Some("Example Wire"));
    assert_eq!(
        doc.body.tagline.as_deref(),
        Some("Reporting by the Example Wire staff.")
    );
}

#[test]
fn test_paragraphs_and_text() {
    let doc = storm();
    let paragraphs = doc.paragraphs();

    assert_eq!(paragraphs.len(), 5);
    assert_eq!(paragraphs[0].id(), Some("p1"));
    assert!(paragraphs[0].is_lede());
    assert_eq!(
        paragraphs[1].text(),
        "Mayor Mary Major asked residents to stay home.\nShelters opened at noon."
    );
    assert!(paragraphs[4].is_empty());

    assert_eq!(doc.lede().and_then(|p| p.id()), Some("p1"));
    assert_eq!(doc.word_count(), 66);
    assert!(doc.text().starts_with("A powerful storm"));
    assert!(doc.text().ends_with("at the storm page."));
    assert!(!doc.text().ends_with('\n'));
}

#[test]
fn test_media() {
    let doc = storm();

    assert_eq!(doc.media().len(), 2);
    let images = doc.images();
    assert_eq!(images.len(), 1);

    let image = images[0];
    let reference = image.primary_reference().unwrap();
    assert_eq!(reference.source.as_deref(), Some("storm-waves.jpg"));
    assert_eq!(reference.height, Some(480));
    assert_eq!(reference.width, Some(640));
    assert_eq!(
        image.caption.as_deref(),
        Some("Waves crash over the sea wall in Portland.")
    );
    assert_eq!(image.producer.as_deref(), Some("Photo by Ann Lee"));

    assert!(doc.find_media("video")[0].is_video());
    assert!(doc.find_media("audio").is_empty());
}

#[test]
fn test_paragraph_entities() {
    let doc = storm();
    let paragraphs = doc.paragraphs();

    assert_eq!(paragraphs[0].locations(), ["Portland"]);
    assert_eq!(paragraphs[0].organizations(), ["National Weather Service"]);
    assert_eq!(paragraphs[2].people(), ["John Doe"]);
    assert_eq!(paragraphs[3].emphasis(), ["the strongest"]);
    assert_eq!(paragraphs[3].strong(), ["extreme caution"]);
    assert_eq!(
        paragraphs[3].links(),
        [Link {
            text: Some("the storm page".to_string()),
            href: Some("https://example.com/storm".to_string()),
        }]
    );
}

#[test]
fn test_entity_extraction_is_lazy() {
    let doc = storm();
    let paragraph = &doc.paragraphs()[1];

    let _ = paragraph.text();
    assert!(!paragraph.entities_extracted());

    let first: *const [String] = paragraph.people();
    assert!(paragraph.entities_extracted());
    let second: *const [String] = paragraph.people();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_all_entities_aggregation() {
    let doc = storm();

    assert_eq!(doc.all_people(), ["Mary Major", "John Doe"]);
    assert_eq!(
        doc.all_organizations(),
        ["National Weather Service", "Central Power"]
    );
    assert_eq!(doc.all_locations(), ["Portland", "Cape Elizabeth"]);
    assert!(std::ptr::eq(doc.all_entities(), doc.all_entities()));
}

#[test]
fn test_mentions() {
    let doc = storm();

    assert!(doc.mentions_person("mary").unwrap());
    assert!(doc.mentions_organization("weather service").unwrap());
    assert!(doc.mentions_location("ELIZABETH").unwrap());
    assert!(!doc.mentions_person("Jane Smith").unwrap());

    let paragraph = &doc.paragraphs()[2];
    assert!(paragraph.mentions_person("John Doe", true).unwrap());
    assert!(!paragraph.mentions_person("john doe", true).unwrap());
    assert!(paragraph.mentions_person("john doe", false).unwrap());
    assert!(paragraph.mentions("central", false).unwrap());
}

#[test]
fn test_paragraphs_mentioning() {
    let doc = storm();

    let any = doc
        .paragraphs_mentioning(&MentionFilter::new().person("Mary").location("Cape"), false)
        .unwrap();
    let ids: Vec<_> = any.iter().filter_map(|p| p.id()).collect();
    assert_eq!(ids, vec!["p2", "p3"]);

    let all = doc
        .paragraphs_mentioning(&MentionFilter::new().person("John").location("Cape"), true)
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), Some("p3"));

    assert_eq!(
        doc.paragraphs_mentioning(&MentionFilter::new(), true)
            .unwrap()
            .len(),
        doc.paragraphs().len()
    );
}

#[test]
fn test_search() {
    let doc = storm();

    let matches = doc.search("storm", false).unwrap();
    let found: Vec<_> = matches
        .iter()
        .map(|m| (m.paragraph_index, m.offset, m.matched.as_str()))
        .collect();
    assert_eq!(found, vec![(0, 11, "storm"), (3, 21, "storm"), (3, 110, "storm")]);

    assert_eq!(doc.count_occurrences("storm", false).unwrap(), 3);
    assert_eq!(doc.count_occurrences("Storm", true).unwrap(), 0);
    assert!(doc.contains("40,000", true).unwrap());
    assert!(!doc.contains("hurricane", false).unwrap());

    let containing = doc.paragraphs_containing("crews", false).unwrap();
    assert_eq!(containing.len(), 1);
    assert_eq!(containing[0].id(), Some("p3"));
}

#[test]
fn test_search_with_regex() {
    let doc = storm();
    let query = Query::regex(r"\d+,\d{3}").unwrap();

    let matches = doc.search(query, true).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].matched, "40,000");
}

#[test]
fn test_count_equals_sum_of_search() {
    let doc = storm();

    for query in ["storm", "the", "o", "", "zzz"] {
        let query = Query::literal(query);
        let per_paragraph: usize = doc
            .paragraphs()
            .iter()
            .map(|p| search(std::slice::from_ref(p), &query, false).unwrap().len())
            .sum();
        assert_eq!(
            count_occurrences(doc.paragraphs(), &query, false).unwrap(),
            per_paragraph
        );
    }
}

#[test]
fn test_excerpt() {
    let doc = storm();

    assert_eq!(
        doc.excerpt_with("shelters", 10, false).unwrap().as_deref(),
        Some("...tay home.\nShelters opened at...")
    );
    assert_eq!(
        doc.excerpt_with("40,000", 0, true).unwrap().as_deref(),
        Some("...40,000...")
    );
    assert_eq!(doc.excerpt("hurricane").unwrap(), None);
}

#[test]
fn test_excerpt_window_around_technology() {
    // 200 characters with "technology" starting at character 50
    let text = format!("{}technology{}", "a".repeat(50), "b".repeat(140));
    assert_eq!(text.chars().count(), 200);
    let xml = format!("<nitf><body><body.content><p>{text}</p></body.content></body></nitf>");
    let doc = Document::parse(&xml).unwrap();

    let excerpt = doc.excerpt_with("technology", 10, false).unwrap().unwrap();
    assert_eq!(
        excerpt,
        format!("...{}technology{}...", "a".repeat(10), "b".repeat(10))
    );
    assert_eq!(excerpt.trim_matches('.').chars().count(), 30);
}

#[test]
fn test_techcorp_fixture() {
    let doc = Document::parse(&load_fixture("techcorp.xml")).unwrap();
    let paragraphs = doc.paragraphs();

    assert_eq!(paragraphs[0].text(), "TechCorp Inc, led by John Doe.");
    assert_eq!(paragraphs[0].people(), ["John Doe"]);
    assert_eq!(paragraphs[0].emphasis(), ["Inc"]);
    assert!(paragraphs[0].organizations().is_empty());
    assert_eq!(paragraphs[1].text(), "Line one\nLine two");
    assert_eq!(paragraphs[2].text(), "Line one\n\nLine three");
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("article.xml");
    fs::write(&path, load_fixture("techcorp.xml")).unwrap();

    let doc = Document::from_file(&path).unwrap();
    assert_eq!(doc.title(), Some("TechCorp update"));

    let missing = Document::from_file(dir.path().join("missing.xml")).unwrap_err();
    assert!(matches!(missing, NitfError::Io(_)));
}

#[test]
fn test_doctype_can_be_rejected() {
    let xml = load_fixture("storm.xml");
    let options = ParseOptions::default().with_allow_dtd(false);

    let err = Document::parse_with_options(&xml, &options).unwrap_err();
    assert!(matches!(err, NitfError::XmlParse(_)));
}

#[test]
fn test_wrong_root_element() {
    let err = Document::parse("<article><p>x</p></article>").unwrap_err();
    assert!(matches!(err, NitfError::MissingElement { .. }));
    assert!(err.to_string().contains("found <article>"));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let depth = 100;
    let xml = format!(
        "<nitf><body><body.content><p>{}deep{}</p></body.content></body></nitf>",
        "<em>".repeat(depth),
        "</em>".repeat(depth)
    );

    let options = ParseOptions::default().with_max_depth(50);
    let err = Document::parse_with_options(&xml, &options).unwrap_err();
    assert!(matches!(err, NitfError::TooDeep { limit: 50, .. }));

    let doc = Document::parse(&xml).unwrap();
    assert_eq!(doc.paragraphs()[0].text(), "deep");
}

#[test]
fn test_export_markdown() {
    let markdown = to_markdown(&storm());

    assert!(markdown.starts_with("# Storm Leaves Thousands Without Power\n\n## Crews expect"));
    assert!(markdown.contains("*By Jane Smith, Staff Writer*"));
    assert!(markdown.contains("**PORTLAND, Maine, Jan. 15** - A powerful storm"));
    assert!(markdown.contains("stay home.  \nShelters"));
    assert!(markdown.contains("![Waves over the sea wall](storm-waves.jpg)"));
    assert!(markdown.ends_with("---\n\nReporting by the Example Wire staff.\n"));
}

#[test]
fn test_export_all_formats() {
    let doc = storm();

    let html = render(&doc, ExportFormat::Html).unwrap();
    assert!(html.contains("<p class=\"lede\">A powerful storm"));
    assert!(html.contains("<img src=\"storm-waves.jpg\" alt=\"Waves over the sea wall\">"));

    let text = render(&doc, ExportFormat::Text).unwrap();
    assert!(text.lines().all(|line| line.chars().count() <= 80));

    let json = render(&doc, ExportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["doc_id"], "EXW-2024-0115-001");
    assert_eq!(value["paragraphs"].as_array().unwrap().len(), 4);
    assert_eq!(value["entities"]["people"][1], "John Doe");

    let yaml = render(&doc, ExportFormat::Yaml).unwrap();
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();
    assert_eq!(value["keywords"][1].as_str(), Some("power outage"));

    let summary = DocumentSummary::new(&doc);
    assert_eq!(summary.media.len(), 2);
    assert_eq!(summary.word_count, 66);
}
