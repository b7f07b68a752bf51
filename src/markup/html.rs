//! HTML output validation
//!
//! The document is parsed with html5ever, which recovers from every error the
//! way a browser would and reports each one to the tree sink. Any reported
//! error makes the document invalid, including a missing `<!DOCTYPE html>`.

use html5ever::tendril::TendrilSink;
use html5ever::tokenizer::TokenizerOpts;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::RcDom;

use super::MarkupError;

/// Check `markup` as a complete HTML document
pub fn validate_html(markup: &str) -> Result<(), MarkupError> {
    let opts = ParseOpts {
        tokenizer: TokenizerOpts {
            exact_errors: true,
            ..Default::default()
        },
        tree_builder: TreeBuilderOpts {
            exact_errors: true,
            ..Default::default()
        },
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .map_err(|e| MarkupError::General(e.to_string()))?;

    match dom.errors.first() {
        Some(first) => {
            let message = if dom.errors.len() > 1 {
                format!("{} ({} more)", first, dom.errors.len() - 1)
            } else {
                first.to_string()
            };
            Err(MarkupError::Html(message))
        }
        None => Ok(()),
    }
}
