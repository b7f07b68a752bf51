//! Brace balance checking for `{{ ... }}` expression delimiters
//!
//! The template engine accepts some unbalanced delimiter sequences: a lone
//! `{` before `}}` is plain text to it, and nothing inside comments or raw
//! blocks is tokenized. Those are treated as defects here. The checker works on raw source text and does
//! not know the template grammar; it flags two shapes:
//!
//! - a closing mismatch: `{{`, an expression body made of word characters,
//!   whitespace, brackets, quotes and pipes, then a single `}` followed by a
//!   character other than `}`
//! - an opening mismatch: a lone `{` (neither preceded nor followed by `{`)
//!   with a `}}` later on the same line
//!
//! Opening mismatches take precedence: when any are present, closing
//! mismatches are not reported.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt;
use thiserror::Error;

use crate::core::diagnostics::span_at;

/// A flagged delimiter sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BraceMatch {
    /// Byte offset of the first character of the match
    pub offset: usize,
    /// The matched source text
    pub text: String,
}

/// Raw matches, rendered as a bracketed list of quoted strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchList(pub Vec<String>);

impl fmt::Display for MatchList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Brace balance error carrying the offending raw matches
#[derive(Debug, Error, Diagnostic)]
pub enum BraceError {
    #[error("The braces are not opened properly here: {matches}")]
    #[diagnostic(
        code(jintest::braces::opening),
        help("Expressions must open with a double brace; a lone brace before a double close is flagged")
    )]
    Opening {
        matches: MatchList,
        #[source_code]
        src: NamedSource<String>,
        #[label("opened with a single brace")]
        span: SourceSpan,
    },

    #[error("The braces are not closed properly here: {matches}")]
    #[diagnostic(
        code(jintest::braces::closing),
        help("Expressions must close with a double brace")
    )]
    Closing {
        matches: MatchList,
        #[source_code]
        src: NamedSource<String>,
        #[label("closed with a single brace")]
        span: SourceSpan,
    },
}

impl BraceError {
    /// The raw matched substrings
    pub fn matches(&self) -> &[String] {
        match self {
            BraceError::Opening { matches, .. } | BraceError::Closing { matches, .. } => &matches.0,
        }
    }

    pub fn is_opening(&self) -> bool {
        matches!(self, BraceError::Opening { .. })
    }
}

/// Check `source` for mismatched expression braces
pub fn check_braces(source: &str, filename: &str) -> Result<(), BraceError> {
    let opening = find_opening_mismatches(source);
    if let Some(first) = opening.first() {
        let span = span_at(source, first.offset, first.text.len());
        return Err(BraceError::Opening {
            matches: MatchList(opening.into_iter().map(|m| m.text).collect()),
            src: NamedSource::new(filename, source.to_string()),
            span,
        });
    }

    let closing = find_closing_mismatches(source);
    if let Some(first) = closing.first() {
        let span = span_at(source, first.offset, first.text.len());
        return Err(BraceError::Closing {
            matches: MatchList(closing.into_iter().map(|m| m.text).collect()),
            src: NamedSource::new(filename, source.to_string()),
            span,
        });
    }

    Ok(())
}

/// Characters allowed inside an expression body for the closing check
fn is_expr_char(c: char) -> bool {
    matches!(c, '[' | ']' | '\'' | '"' | '|' | '_') || c.is_alphanumeric() || c.is_whitespace()
}

/// Find every `{{ body }x` sequence, leftmost first and non-overlapping
pub fn find_closing_mismatches(source: &str) -> Vec<BraceMatch> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let n = chars.len();
    let mut found = Vec::new();
    let mut i = 0;

    while i + 1 < n {
        if chars[i].1 == '{' && chars[i + 1].1 == '{' {
            let body_start = i + 2;
            let mut j = body_start;
            while j < n && is_expr_char(chars[j].1) {
                j += 1;
            }
            if j > body_start && j + 1 < n && chars[j].1 == '}' && chars[j + 1].1 != '}' {
                let (last_offset, last) = chars[j + 1];
                let start = chars[i].0;
                let end = last_offset + last.len_utf8();
                found.push(BraceMatch {
                    offset: start,
                    text: source[start..end].to_string(),
                });
                i = j + 2;
                continue;
            }
        }
        i += 1;
    }

    found
}

/// Find every lone `{` that has a `}}` later on the same line
///
/// Each match starts one character before the brace and runs to the end of
/// the last `}}` on that line.
pub fn find_opening_mismatches(source: &str) -> Vec<BraceMatch> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let n = chars.len();
    let mut found = Vec::new();
    let mut i = 0;

    while i + 2 < n {
        if chars[i].1 != '{' && chars[i + 1].1 == '{' && chars[i + 2].1 != '{' {
            let rest = i + 3;
            let mut eol = rest;
            while eol < n && chars[eol].1 != '\n' {
                eol += 1;
            }
            let close = (rest..eol.saturating_sub(1))
                .rev()
                .find(|&p| chars[p].1 == '}' && chars[p + 1].1 == '}');
            if let Some(p) = close {
                let start = chars[i].0;
                let end = chars[p + 1].0 + 1;
                found.push(BraceMatch {
                    offset: start,
                    text: source[start..end].to_string(),
                });
                i = p + 2;
                continue;
            }
        }
        i += 1;
    }

    found
}
