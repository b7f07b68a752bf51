//! Structural validation of rendered output
//!
//! Each validator wraps an external parser and turns its failure modes into
//! a [`MarkupError`]. Dispatch goes through [`MarkupKind`].

pub mod empty_tags;
pub mod html;
pub mod json;
pub mod xml;

use miette::Diagnostic;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use empty_tags::{find_empty_cdata, find_empty_tags, format_empty_tags, TagDisplay};
pub use html::validate_html;
pub use json::validate_json;
pub use xml::validate_xml;

/// Markup validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MarkupError {
    #[error("Problem with output HTML: {0}")]
    #[diagnostic(code(jintest::markup::html))]
    Html(String),

    #[error("XML syntax error: {0}")]
    #[diagnostic(code(jintest::markup::xml))]
    Xml(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(jintest::markup::json))]
    Json(String),

    #[error("General exception: {0}")]
    #[diagnostic(code(jintest::markup::general))]
    General(String),

    #[error("No markup type specified!")]
    #[diagnostic(
        code(jintest::markup::unknown_kind),
        help("Accepted values: \"json\", \"html\", \"xml\"")
    )]
    UnknownKind(String),
}

/// Output structure to validate against
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MarkupKind {
    Html,
    Xml,
    Json,
}

impl MarkupKind {
    /// Validate `markup` as this kind of document
    pub fn validate(self, markup: &str) -> Result<(), MarkupError> {
        match self {
            MarkupKind::Html => validate_html(markup),
            MarkupKind::Xml => validate_xml(markup),
            MarkupKind::Json => validate_json(markup),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarkupKind::Html => "html",
            MarkupKind::Xml => "xml",
            MarkupKind::Json => "json",
        }
    }
}

impl fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkupKind {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(MarkupKind::Html),
            "xml" => Ok(MarkupKind::Xml),
            "json" => Ok(MarkupKind::Json),
            _ => Err(MarkupError::UnknownKind(s.to_string())),
        }
    }
}

/// Validate `markup` as the document type named by `kind` (case-insensitive)
pub fn validate_markup(markup: &str, kind: &str) -> Result<(), MarkupError> {
    kind.parse::<MarkupKind>()?.validate(markup)
}
