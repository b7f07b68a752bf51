//! JSON output validation

use super::MarkupError;

/// Check that `markup` is a single well-formed JSON document
pub fn validate_json(markup: &str) -> Result<(), MarkupError> {
    serde_json::from_str::<serde_json::Value>(markup)
        .map(|_| ())
        .map_err(|e| MarkupError::Json(e.to_string()))
}
