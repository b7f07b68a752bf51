//! Finding empty element pairs in rendered output
//!
//! Templates often render `<field></field>` when a value is missing from the
//! data. These helpers list such pairs so they can be checked by hand.

use regex::Regex;
use std::sync::LazyLock;

/// Which form of match to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagDisplay {
    /// Only pairs preceded by a list number, e.g. `3) <a></a>`
    #[default]
    Numbered,
    /// Bare `<a></a>` pairs
    Bare,
}

static NUMBERED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[)]\s*<.*?>\s*</.*?>").unwrap());

static BARE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>\s*</.*?>").unwrap());

/// Find empty element pairs in `text`, sorted
///
/// Matches containing `CDATA` are skipped. When anything is found, a banner
/// and a numbered listing (in document order) are printed to stdout.
pub fn find_empty_tags(text: &str, display: TagDisplay) -> Vec<String> {
    let pattern = match display {
        TagDisplay::Numbered => &NUMBERED_PATTERN,
        TagDisplay::Bare => &BARE_PATTERN,
    };

    let mut found: Vec<String> = pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|m| !m.contains("CDATA"))
        .collect();

    if !found.is_empty() {
        println!("Double check tags and make sure if the field is in DRS");
        for (i, tag) in found.iter().enumerate() {
            println!("{} - {}", i + 1, tag);
        }
    }

    found.sort();
    found
}

/// One tag per line
pub fn format_empty_tags(tags: &[String]) -> String {
    tags.join("\n")
}

/// Entries that wrap an empty CDATA section, e.g. `<a><![CDATA[]]></a>`
pub fn find_empty_cdata(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| tag.contains("><![CDATA[]]></"))
        .cloned()
        .collect()
}
