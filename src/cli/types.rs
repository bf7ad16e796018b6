use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "doctoc")]
#[command(about = "Assign stable ids to HTML headings and print a table of contents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// HTML files to process
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Configuration file (YAML)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Heading range, e.g. h2-4
    #[arg(short, long, value_name = "hN-M")]
    pub range: Option<String>,

    /// Heading selector, e.g. "h1, h3"
    #[arg(long, value_name = "SELECTOR")]
    pub selector: Option<String>,

    /// Only search below elements matching this CSS selector
    #[arg(long, value_name = "SELECTOR")]
    pub context: Option<String>,

    /// Prefix for generated ids
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Maximum length of prefix + slug
    #[arg(short = 'l', long, value_name = "N")]
    pub length_limit: Option<i64>,

    /// Slug function (slugify, jekyll)
    #[arg(long, value_name = "NAME")]
    pub slug: Option<String>,

    /// Make generated ids unique within the document
    #[arg(short, long, default_value_t = false)]
    pub unique: bool,

    /// Rewrite contents even when no id was generated
    #[arg(short, long, default_value_t = false)]
    pub always_update: bool,

    /// Document shape (auto, fragment, full-document)
    #[arg(long, value_name = "SHAPE")]
    pub shape: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Write changed contents back to the files
    #[arg(short, long, default_value_t = false)]
    pub write: bool,

    /// Prepend an outline comment to written files
    #[arg(long, default_value_t = false, requires = "write")]
    pub attach: bool,

    /// Silence output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false)]
    pub debug: bool,
}

/// How headings are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Heading records as JSON
    Json,
    /// Nested markdown link list
    Markdown,
    /// Nested HTML list
    Html,
    /// Outline comment
    Outline,
}
