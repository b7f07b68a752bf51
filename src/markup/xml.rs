//! XML output validation
//!
//! quick-xml is a streaming reader and only checks what it needs to produce
//! events, so document-level rules are enforced here: exactly one root
//! element, every element closed, no text outside the root, legal names and
//! characters, escaped `&` and `<` in attribute values.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::MarkupError;

/// Check `markup` as a well-formed XML document
pub fn validate_xml(markup: &str) -> Result<(), MarkupError> {
    check_chars(markup)?;

    let mut reader = Reader::from_reader(markup.as_bytes());
    reader.config_mut().check_end_names = true;

    let mut buf = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut roots = 0usize;
    let mut first = true;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(reader_error)?;
        match event {
            Event::Decl(_) if !first => {
                return Err(MarkupError::Xml(
                    "XML declaration allowed only at the start of the document".to_string(),
                ));
            }
            Event::Start(e) => {
                check_element(&e)?;
                if open.is_empty() {
                    roots += 1;
                    check_single_root(roots)?;
                }
                open.push(element_name(&e));
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Empty(e) => {
                check_element(&e)?;
                if open.is_empty() {
                    roots += 1;
                    check_single_root(roots)?;
                }
            }
            Event::Text(e) => {
                if contains(&e, b"]]>") {
                    return Err(MarkupError::Xml(
                        "sequence ']]>' not allowed in content".to_string(),
                    ));
                }
                let text = e.unescape().map_err(|e| MarkupError::Xml(e.to_string()))?;
                check_chars(&text)?;
                if open.is_empty() && !text.trim().is_empty() {
                    return Err(MarkupError::Xml(
                        "text content outside of the root element".to_string(),
                    ));
                }
            }
            Event::CData(_) if open.is_empty() => {
                return Err(MarkupError::Xml(
                    "CDATA section outside of the root element".to_string(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
        first = false;
        buf.clear();
    }

    if let Some(name) = open.last() {
        return Err(MarkupError::Xml(format!(
            "premature end of data, element <{}> is not closed",
            name
        )));
    }
    if roots == 0 {
        return Err(MarkupError::Xml("document is empty".to_string()));
    }

    Ok(())
}

fn reader_error(err: quick_xml::Error) -> MarkupError {
    match err {
        quick_xml::Error::Io(e) => MarkupError::General(e.to_string()),
        other => MarkupError::Xml(other.to_string()),
    }
}

fn check_single_root(roots: usize) -> Result<(), MarkupError> {
    if roots > 1 {
        return Err(MarkupError::Xml(
            "extra content at the end of the document".to_string(),
        ));
    }
    Ok(())
}

fn check_element(e: &BytesStart<'_>) -> Result<(), MarkupError> {
    check_name(e.name().as_ref(), "element")?;
    for attr in e.attributes() {
        let attr = attr.map_err(|err| MarkupError::Xml(err.to_string()))?;
        check_name(attr.key.as_ref(), "attribute")?;
        if attr.value.contains(&b'<') {
            return Err(MarkupError::Xml(format!(
                "unescaped '<' not allowed in value of attribute '{}'",
                String::from_utf8_lossy(attr.key.as_ref())
            )));
        }
        let value = attr
            .unescape_value()
            .map_err(|err| MarkupError::Xml(err.to_string()))?;
        check_chars(&value)?;
    }
    Ok(())
}

/// XML 1.0 `Name` production
fn check_name(name: &[u8], what: &str) -> Result<(), MarkupError> {
    let name = String::from_utf8_lossy(name);
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if is_name_start(c) => chars.all(|c| is_name_start(c) || is_name_char(c)),
        _ => false,
    };
    if !valid {
        return Err(MarkupError::Xml(format!("invalid {} name '{}'", what, name)));
    }
    Ok(())
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '.' || c == '\u{B7}'
}

/// Reject characters outside the XML 1.0 `Char` production
fn check_chars(text: &str) -> Result<(), MarkupError> {
    let bad = text.chars().find(|&c| {
        matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
    });
    match bad {
        Some(c) => Err(MarkupError::Xml(format!(
            "char 0x{:X} out of allowed range",
            c as u32
        ))),
        None => Ok(()),
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_elements() {
        assert!(validate_xml("<a><b/></a>").is_ok());
    }

    #[test]
    fn test_declaration_and_entities() {
        let doc = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root attr=\"1\">x &amp; y<![CDATA[<raw>]]></root>\n";
        assert!(validate_xml(doc).is_ok());
    }

    #[test]
    fn test_mismatched_end_tag() {
        let err = validate_xml("<a><b></a>").unwrap_err();
        assert!(matches!(err, MarkupError::Xml(_)));
    }

    #[test]
    fn test_unclosed_root() {
        let err = validate_xml("<a><b/>").unwrap_err();
        assert!(matches!(err, MarkupError::Xml(_)));
    }

    #[test]
    fn test_empty_document() {
        assert!(validate_xml("").is_err());
        assert!(validate_xml("   \n").is_err());
    }

    #[test]
    fn test_multiple_roots() {
        assert!(validate_xml("<a/><b/>").is_err());
    }

    #[test]
    fn test_text_outside_root() {
        assert!(validate_xml("hello <a/>").is_err());
    }

    #[test]
    fn test_unknown_entity() {
        assert!(validate_xml("<a>&bogus;</a>").is_err());
    }

    #[test]
    fn test_unquoted_attribute() {
        assert!(validate_xml("<a b=c/>").is_err());
    }

    #[test]
    fn test_bare_ampersand_in_attribute() {
        assert!(matches!(validate_xml("<a b=\"x & y\"/>"), Err(MarkupError::Xml(_))));
        assert!(validate_xml("<a href=\"?a=1&b=2\">x</a>").is_err());
        assert!(validate_xml("<a href=\"?a=1&amp;b=2\">x</a>").is_ok());
    }

    #[test]
    fn test_less_than_in_attribute() {
        assert!(matches!(validate_xml("<a b=\"1 < 2\"/>"), Err(MarkupError::Xml(_))));
        assert!(validate_xml("<a b=\"1 &lt; 2\"/>").is_ok());
    }

    #[test]
    fn test_name_starting_with_digit() {
        assert!(matches!(validate_xml("<1a></1a>"), Err(MarkupError::Xml(_))));
        assert!(validate_xml("<a 1b=\"x\"/>").is_err());
        assert!(validate_xml("<ns:a-1.b_c/>").is_ok());
    }

    #[test]
    fn test_declaration_after_root() {
        let err = validate_xml("<a/><?xml version=\"1.0\"?>").unwrap_err();
        assert!(matches!(err, MarkupError::Xml(_)));
    }

    #[test]
    fn test_control_character() {
        assert!(matches!(validate_xml("<a>\u{1}</a>"), Err(MarkupError::Xml(_))));
        assert!(validate_xml("<a>&#1;</a>").is_err());
        assert!(validate_xml("<a>tab\there</a>").is_ok());
    }

    #[test]
    fn test_cdata_end_in_text() {
        assert!(matches!(validate_xml("<a>]]></a>"), Err(MarkupError::Xml(_))));
    }

    #[test]
    fn test_unicode_content() {
        assert!(validate_xml("<note>naïve café</note>").is_ok());
    }
}
