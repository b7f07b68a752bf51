//! Source locations and hints for template diagnostics

use miette::SourceSpan;

/// Convert a 1-based line/column pair to a byte offset
pub fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    let mut current_line = 1;

    for (i, ch) in source.char_indices() {
        if current_line == line {
            let line_start = i;
            let mut col = 1;
            for (j, c) in source[line_start..].char_indices() {
                if col == column {
                    return line_start + j;
                }
                if c == '\n' {
                    break;
                }
                col += 1;
            }
            return line_start + column.saturating_sub(1);
        }
        if ch == '\n' {
            current_line += 1;
        }
        offset = i;
    }

    offset
}

/// Span covering the whole of a 1-based line, without its newline
pub fn line_span(source: &str, line: usize) -> SourceSpan {
    let start = line_col_to_offset(source, line, 1).min(source.len());
    let len = source[start..]
        .find('\n')
        .unwrap_or(source.len() - start);
    SourceSpan::from(start..start + len.max(1).min(source.len() - start))
}

/// Span covering `len` bytes at `offset`, clamped to the source
pub fn span_at(source: &str, offset: usize, len: usize) -> SourceSpan {
    let start = offset.min(source.len());
    let end = start.saturating_add(len).min(source.len());
    SourceSpan::from(start..end)
}

/// Generate a suggestion from a template engine message
pub fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("unexpected end of input") || msg_lower.contains("missing end") {
        return Some(
            "A block tag is never closed. Check for a missing {% endif %}, {% endfor %} or {% endblock %}."
                .to_string(),
        );
    }

    if msg_lower.contains("unknown statement") {
        return Some("Only built-in statements are understood; check the tag name for typos.".to_string());
    }

    if msg_lower.contains("expected end of variable block") {
        return Some("Expressions must be closed with '}}'.".to_string());
    }

    if msg_lower.contains("expected end of block") {
        return Some("Statements must be closed with '%}'.".to_string());
    }

    if msg_lower.contains("unexpected") && msg_lower.contains("}") {
        return Some("Check that every '{{' has a matching '}}' and every '{%' a matching '%}'.".to_string());
    }

    None
}
