//! Loading JSON render data

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Render data could not be loaded
#[derive(Debug, Error, Diagnostic)]
pub enum DataError {
    #[error("Problem with input json: {}: {source}", .path.display())]
    #[diagnostic(code(jintest::data::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Problem with input json: {0}")]
    #[diagnostic(
        code(jintest::data::parse),
        help("The data file must hold a single JSON object whose keys are the template's top-level names")
    )]
    Parse(serde_json::Error),
}

/// Read and decode a JSON data file
pub fn load_data(path: &Path) -> Result<serde_json::Value, DataError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(DataError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_object() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, r#"{"title": "x"}"#).unwrap();
        let data = load_data(&path).unwrap();
        assert_eq!(data["title"], "x");
    }

    #[test]
    fn test_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, "{\"title\": ").unwrap();
        let err = load_data(&path).unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
        assert!(err.to_string().starts_with("Problem with input json: "));
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_data(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DataError::Read { .. }));
    }
}
