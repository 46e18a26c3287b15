//! Dataset loading module
//!
//! Reads and parses the JSON dataset files from disk. There is no caching:
//! every call re-reads and re-parses, so external edits to a dataset take
//! effect on the next request without a restart.

use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Filename of the sections document.
pub const SECTIONS_FILE: &str = "sections.json";
/// Filename of the movie catalog.
pub const CATALOG_FILE: &str = "movieDetails.json";

/// Failure to load a dataset, carried as data so the handler decides the
/// HTTP status.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read {name}: {source}")]
    Read {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {name}: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Expected {name} to contain a JSON object")]
    NotAnObject { name: &'static str },
}

/// Read a dataset file under `dir` and parse it as JSON.
///
/// `name` is always one of the two fixed dataset filenames, never derived
/// from user input, so no path sanitization is needed.
pub async fn read_json(dir: &Path, name: &'static str) -> Result<Value, DatasetError> {
    let path = dir.join(name);
    let text = fs::read_to_string(&path)
        .await
        .map_err(|source| DatasetError::Read { name, source })?;
    serde_json::from_str(&text).map_err(|source| DatasetError::Parse { name, source })
}

/// Load the movie catalog as a key-to-record mapping.
///
/// Entries keep file order, which the resolver relies on for its
/// first-hit-wins scan.
pub async fn read_catalog(dir: &Path) -> Result<serde_json::Map<String, Value>, DatasetError> {
    match read_json(dir, CATALOG_FILE).await? {
        Value::Object(map) => Ok(map),
        _ => Err(DatasetError::NotAnObject { name: CATALOG_FILE }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_dataset(dir: &TempDir, name: &str, content: &str) {
        let mut file = File::create(dir.path().join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn test_read_json_parses_file() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir, SECTIONS_FILE, r#"{"sections": ["a", "b"]}"#);

        let value = read_json(dir.path(), SECTIONS_FILE).await.unwrap();
        assert_eq!(value["sections"][0], "a");
    }

    #[tokio::test]
    async fn test_missing_file_error_names_file() {
        let dir = TempDir::new().unwrap();

        let err = read_json(dir.path(), SECTIONS_FILE).await.unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
        assert!(err.to_string().contains(SECTIONS_FILE));
    }

    #[tokio::test]
    async fn test_malformed_json_error_names_file() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir, CATALOG_FILE, "{not json");

        let err = read_json(dir.path(), CATALOG_FILE).await.unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
        assert!(err.to_string().contains(CATALOG_FILE));
    }

    #[tokio::test]
    async fn test_catalog_must_be_object() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir, CATALOG_FILE, r#"["not", "an", "object"]"#);

        let err = read_catalog(dir.path()).await.unwrap_err();
        assert!(matches!(err, DatasetError::NotAnObject { .. }));
    }

    #[tokio::test]
    async fn test_catalog_preserves_file_order() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir, CATALOG_FILE, r#"{"zulu": {}, "alpha": {}}"#);

        let catalog = read_catalog(dir.path()).await.unwrap();
        let keys: Vec<&String> = catalog.keys().collect();
        assert_eq!(keys, ["zulu", "alpha"]);
    }
}
