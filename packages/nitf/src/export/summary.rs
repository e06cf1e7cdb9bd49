//! Structured JSON/YAML summaries of a document.

use serde::Serialize;

use crate::document::Document;
use crate::error::Result;
use crate::types::{AllEntities, Media};

/// Serializable view over the parts of a document worth exchanging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bylines: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dateline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_issue: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_release: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<&'a str>,
    pub word_count: usize,
    pub paragraphs: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaSummary<'a>>,
    pub entities: &'a AllEntities,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSummary<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'a str>,
}

impl<'a> From<&'a Media> for MediaSummary<'a> {
    fn from(media: &'a Media) -> Self {
        Self {
            media_type: media.media_type.as_deref(),
            source: media.primary_reference().and_then(|r| r.source.as_deref()),
            caption: media.caption.as_deref(),
        }
    }
}

impl<'a> DocumentSummary<'a> {
    /// Build a summary; empty paragraphs are left out.
    #[must_use]
    pub fn new(doc: &'a Document) -> Self {
        let docdata = &doc.head.docdata;
        Self {
            title: doc.title(),
            headline: doc.headline(),
            subheadline: doc.subheadline(),
            doc_id: doc.doc_id(),
            bylines: doc
                .bylines()
                .iter()
                .map(|b| b.text())
                .filter(|text| !text.is_empty())
                .collect(),
            dateline: doc
                .dateline()
                .map(|d| d.text.as_str())
                .filter(|text| !text.is_empty()),
            date_issue: docdata.date_issue.as_deref(),
            date_release: docdata.date_release.as_deref(),
            keywords: docdata.keywords.iter().map(String::as_str).collect(),
            word_count: doc.word_count(),
            paragraphs: doc
                .paragraphs()
                .iter()
                .map(|p| p.text())
                .filter(|text| !text.is_empty())
                .collect(),
            media: doc.media().iter().map(MediaSummary::from).collect(),
            entities: doc.all_entities(),
        }
    }
}

/// Serialize a document summary as JSON.
pub fn to_json(doc: &Document, pretty: bool) -> Result<String> {
    let summary = DocumentSummary::new(doc);
    let json = if pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    Ok(json)
}

/// Serialize a document summary as YAML.
pub fn to_yaml(doc: &Document) -> Result<String> {
    Ok(serde_yaml_ng::to_string(&DocumentSummary::new(doc))?)
}
