//! Lookup endpoint handlers
//!
//! Each handler loads its dataset fresh from disk and reduces the outcome
//! to an HTTP status plus a JSON body, leaving response writing to the
//! single builder in [`crate::http::response`]. Returning plain data keeps
//! the handlers testable without a socket.

use hyper::StatusCode;
use serde_json::{json, Value};
use std::path::Path;

use crate::dataset::{self, CATALOG_FILE, SECTIONS_FILE};
use crate::resolver::{self, Resolution};

/// Handle `GET /sections`.
///
/// The sections document is passed through verbatim when it carries a
/// `sections` field; anything else is reported as a load failure.
pub async fn sections(dataset_dir: &Path) -> (StatusCode, Value) {
    match dataset::read_json(dataset_dir, SECTIONS_FILE).await {
        Ok(doc) if doc.get("sections").is_some() => (StatusCode::OK, doc),
        // Parsed but no `sections` field: report the document itself
        Ok(doc) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": format!("Could not load {SECTIONS_FILE}"),
                "details": doc,
            }),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": format!("Could not load {SECTIONS_FILE}"),
                "details": err.to_string(),
            }),
        ),
    }
}

/// Handle `GET /movie`, with the title taken from the query string or the
/// path segment by the router.
pub async fn movie(dataset_dir: &Path, title: Option<&str>) -> (StatusCode, Value) {
    let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            json!({ "error": "Missing `title` (query or path param)" }),
        );
    };

    let catalog = match dataset::read_catalog(dataset_dir).await {
        Ok(catalog) => catalog,
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Could not load {CATALOG_FILE}: {err}") }),
            );
        }
    };

    match resolver::resolve(&catalog, title) {
        Resolution::Found(entry) => (
            StatusCode::OK,
            json!({ "key": entry.key, "movie": entry.movie }),
        ),
        Resolution::Ambiguous(matches) => (StatusCode::OK, json!({ "matches": matches })),
        Resolution::NotFound => (
            StatusCode::NOT_FOUND,
            json!({ "error": "Movie not found" }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dataset_dir(catalog: Option<&str>, sections_doc: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        if let Some(content) = catalog {
            fs::write(dir.path().join(CATALOG_FILE), content).unwrap();
        }
        if let Some(content) = sections_doc {
            fs::write(dir.path().join(SECTIONS_FILE), content).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn test_single_match_returns_key_and_movie() {
        let dir = dataset_dir(
            Some(r#"{"inception": {"title": "Inception", "year": 2010}}"#),
            None,
        );

        let (status, body) = movie(dir.path(), Some("Inception")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["key"], "inception");
        assert_eq!(body["movie"]["year"], 2010);
    }

    #[tokio::test]
    async fn test_substring_matches_return_ambiguous_list() {
        let dir = dataset_dir(
            Some(r#"{"up": {"title": "Up"}, "upside down": {"title": "Upside Down"}}"#),
            None,
        );

        let (status, body) = movie(dir.path(), Some("p")).await;
        assert_eq!(status, StatusCode::OK);
        let matches = body["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["key"], "up");
        assert_eq!(matches[1]["key"], "upside down");
    }

    #[tokio::test]
    async fn test_missing_title_is_bad_request() {
        let dir = dataset_dir(Some("{}"), None);

        let (status, body) = movie(dir.path(), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing `title` (query or path param)");

        let (status, _) = movie(dir.path(), Some("  ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_no_match_is_not_found() {
        let dir = dataset_dir(Some(r#"{"inception": {"title": "Inception"}}"#), None);

        let (status, body) = movie(dir.path(), Some("nonexistent")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Movie not found");
    }

    #[tokio::test]
    async fn test_missing_catalog_is_server_error() {
        let dir = dataset_dir(None, None);

        let (status, body) = movie(dir.path(), Some("inception")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains(CATALOG_FILE));
    }

    #[tokio::test]
    async fn test_sections_passes_document_through() {
        let dir = dataset_dir(None, Some(r#"{"sections": [{"id": "trending"}]}"#));

        let (status, body) = sections(dir.path()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"][0]["id"], "trending");
    }

    #[tokio::test]
    async fn test_sections_missing_file_is_server_error() {
        let dir = dataset_dir(None, None);

        let (status, body) = sections(dir.path()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains(SECTIONS_FILE));
        assert!(body["details"].as_str().unwrap().contains(SECTIONS_FILE));
    }

    #[tokio::test]
    async fn test_sections_without_sections_field_is_server_error() {
        let dir = dataset_dir(None, Some(r#"{"other": 1}"#));

        let (status, body) = sections(dir.path()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains(SECTIONS_FILE));
        // the parsed document comes back as details
        assert_eq!(body["details"]["other"], 1);
    }

    #[tokio::test]
    async fn test_repeated_requests_are_idempotent() {
        let dir = dataset_dir(
            Some(r#"{"inception": {"title": "Inception", "year": 2010}}"#),
            None,
        );

        let (_, first) = movie(dir.path(), Some("inception")).await;
        let (_, second) = movie(dir.path(), Some("inception")).await;
        assert_eq!(
            serde_json::to_string_pretty(&first).unwrap(),
            serde_json::to_string_pretty(&second).unwrap()
        );
    }
}
