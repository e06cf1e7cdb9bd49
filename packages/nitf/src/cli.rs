//! Command-line interface for inspecting NITF files.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use clap::{Parser, Subcommand};
use console::style;
use regex::Regex;

use crate::config::{ExportFormat, DEFAULT_EXCERPT_CONTEXT};
use crate::document::Document;
use crate::error::Result;
use crate::export::render;
use crate::search::{MentionFilter, Query};

/// Runs of whitespace, collapsed when printing text on a single line.
#[allow(clippy::expect_used)]
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// nitf-reader - Inspect, search and convert NITF news articles.
#[derive(Parser)]
#[command(name = "nitf-reader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the article's headline, byline and structure.
    Show {
        /// NITF file to read
        file: PathBuf,
    },

    /// Find every occurrence of a query in the body paragraphs.
    Search {
        /// NITF file to read
        file: PathBuf,

        /// Text to look for (a regular expression with --regex)
        query: String,

        /// Match case exactly
        #[arg(short = 's', long)]
        case_sensitive: bool,

        /// Treat the query as a regular expression
        #[arg(short, long)]
        regex: bool,
    },

    /// Print the body text around the first match of a query.
    Excerpt {
        /// NITF file to read
        file: PathBuf,

        /// Text to look for
        query: String,

        /// Characters of context on each side of the match
        #[arg(short, long, default_value_t = DEFAULT_EXCERPT_CONTEXT)]
        context: usize,
    },

    /// List the people, organizations and locations in the article.
    Entities {
        /// NITF file to read
        file: PathBuf,
    },

    /// Print the paragraphs that mention the given entities.
    Mentions {
        /// NITF file to read
        file: PathBuf,

        /// Person name (substring, case-insensitive)
        #[arg(long)]
        person: Option<String>,

        /// Organization name (substring, case-insensitive)
        #[arg(long)]
        org: Option<String>,

        /// Location name (substring, case-insensitive)
        #[arg(long)]
        location: Option<String>,

        /// Require every given entity instead of any
        #[arg(long)]
        all: bool,
    },

    /// Convert the article to another format.
    Export {
        /// NITF file to read
        file: PathBuf,

        /// Output format: markdown, text, html, json or yaml
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Output file or directory (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show { file } => show_command(&file),
        Commands::Search {
            file,
            query,
            case_sensitive,
            regex,
        } => search_command(&file, &query, case_sensitive, regex),
        Commands::Excerpt {
            file,
            query,
            context,
        } => excerpt_command(&file, &query, context),
        Commands::Entities { file } => entities_command(&file),
        Commands::Mentions {
            file,
            person,
            org,
            location,
            all,
        } => {
            let filter = MentionFilter {
                person,
                organization: org,
                location,
            };
            mentions_command(&file, &filter, all)
        }
        Commands::Export {
            file,
            format,
            output,
        } => export_command(&file, &format, output.as_deref()),
    }
}

/// Collapse whitespace so multi-line paragraph text prints on one line.
fn one_line(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

fn show_command(file: &Path) -> Result<()> {
    let doc = Document::from_file(file)?;

    let headline = doc.headline().or(doc.title()).unwrap_or("(untitled)");
    println!("{}", style(headline).bold());
    if let Some(subheadline) = doc.subheadline() {
        println!("{}", style(subheadline).italic());
    }
    println!();

    if let Some(byline) = doc.byline() {
        println!("  Byline: {}", style(byline).green());
    }
    if let Some(dateline) = doc.dateline().filter(|d| !d.text.is_empty()) {
        println!("  Dateline: {}", dateline.text);
    }
    if let Some(doc_id) = doc.doc_id() {
        println!("  Doc ID: {}", style(doc_id).cyan());
    }
    if let Some(date) = &doc.head.docdata.date_issue {
        println!("  Issued: {date}");
    }
    println!("  Paragraphs: {}", doc.paragraphs().len());
    println!("  Words: {}", doc.word_count());
    println!("  Media: {}", doc.media().len());

    if let Some(lede) = doc.lede() {
        println!();
        println!("{}", one_line(lede.text()));
    }

    Ok(())
}

fn search_command(file: &Path, query: &str, case_sensitive: bool, regex: bool) -> Result<()> {
    let doc = Document::from_file(file)?;
    let query = if regex {
        Query::regex(query)?
    } else {
        Query::literal(query)
    };

    let matches = doc.search(query, case_sensitive)?;
    for found in &matches {
        println!(
            "{} {}",
            style(format!(
                "[paragraph {} @ {}]",
                found.paragraph_index + 1,
                found.offset
            ))
            .cyan(),
            one_line(&found.context(DEFAULT_EXCERPT_CONTEXT / 2))
        );
    }

    println!();
    println!("{} {}", style("Matches:").bold(), matches.len());
    Ok(())
}

fn excerpt_command(file: &Path, query: &str, context: usize) -> Result<()> {
    let doc = Document::from_file(file)?;
    match doc.excerpt_with(query, context, false)? {
        Some(excerpt) => println!("{}", one_line(&excerpt)),
        None => println!("{}", style("No match").yellow()),
    }
    Ok(())
}

fn print_list(label: &str, values: &[String]) {
    println!("{} ({})", style(label).bold(), values.len());
    for value in values {
        println!("  - {value}");
    }
}

fn entities_command(file: &Path) -> Result<()> {
    let doc = Document::from_file(file)?;
    print_list("People", doc.all_people());
    print_list("Organizations", doc.all_organizations());
    print_list("Locations", doc.all_locations());
    Ok(())
}

fn mentions_command(file: &Path, filter: &MentionFilter, match_all: bool) -> Result<()> {
    let doc = Document::from_file(file)?;
    let paragraphs = doc.paragraphs_mentioning(filter, match_all)?;

    for paragraph in &paragraphs {
        println!("{}", one_line(paragraph.text()));
    }
    println!();
    println!("{} {}", style("Paragraphs:").bold(), paragraphs.len());
    Ok(())
}

/// Where to write an export: `output` itself, or `<stem>.<ext>` inside it
/// when it is an existing directory.
fn export_path(file: &Path, output: &Path, format: ExportFormat) -> PathBuf {
    if output.is_dir() {
        let stem = file
            .file_stem()
            .map_or_else(|| "article".into(), |s| s.to_string_lossy());
        output.join(format!("{stem}.{}", format.extension()))
    } else {
        output.to_path_buf()
    }
}

fn export_command(file: &Path, format: &str, output: Option<&Path>) -> Result<()> {
    // Validate the format before reading the file
    let format = ExportFormat::parse(format)?;
    let doc = Document::from_file(file)?;
    let rendered = render(&doc, format)?;

    match output {
        Some(output) => {
            let path = export_path(file, output, format);
            std::fs::write(&path, rendered)?;
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
