//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: matches method and path,
//! extracts the title argument, dispatches to the lookup handlers, and
//! writes the access log line.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode, Uri, Version};
use serde_json::json;
use std::borrow::Cow;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::handler::lookup;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    let response = route_request(&method, &uri, &state).await;

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: chrono::Local::now(),
            method: method.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(ToString::to_string),
            http_version: version_str(version).to_string(),
            status: response.status().as_u16(),
            body_bytes: content_length(&response),
            referer,
            user_agent,
            request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method and path
async fn route_request(method: &Method, uri: &Uri, state: &AppState) -> Response<Full<Bytes>> {
    let path = uri.path();

    // GET only; every other method falls through to the 404 below
    if *method == Method::GET {
        if path == "/" {
            return http::build_banner_response();
        }
        if path == "/sections" {
            let (status, body) = lookup::sections(&state.dataset_dir).await;
            return http::build_json_response(status, &body);
        }
        if path == "/movie" {
            let title = title_from_query(uri.query());
            let (status, body) = lookup::movie(&state.dataset_dir, title.as_deref()).await;
            return http::build_json_response(status, &body);
        }
        if let Some(title) = title_from_path(path) {
            let (status, body) = lookup::movie(&state.dataset_dir, Some(&title)).await;
            return http::build_json_response(status, &body);
        }
    }

    http::build_json_response(StatusCode::NOT_FOUND, &json!({ "error": "Not found" }))
}

/// Extract the `title` parameter from a query string.
fn title_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == "title")
        .map(|(_, value)| value.into_owned())
}

/// Extract and URL-decode the title from a `/movie/<title>` path.
///
/// Undecodable sequences are passed through raw rather than rejected.
fn title_from_path(path: &str) -> Option<String> {
    let raw = path.strip_prefix("/movie/")?;
    let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
    Some(decoded.into_owned())
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use http_body_util::BodyExt;

    fn state() -> AppState {
        AppState::new(Config::load_from("nonexistent-config").unwrap())
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unmatched_path_is_not_found() {
        let uri: Uri = "/unknown".parse().unwrap();
        let response = route_request(&Method::GET, &uri, &state()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Not found");
    }

    #[tokio::test]
    async fn test_non_get_method_is_not_found() {
        let uri: Uri = "/movie?title=up".parse().unwrap();
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
            let response = route_request(&method, &uri, &state()).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(body_json(response).await["error"], "Not found");
        }
    }

    #[tokio::test]
    async fn test_root_serves_banner() {
        let uri: Uri = "/".parse().unwrap();
        let response = route_request(&Method::GET, &uri, &state()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["Content-Type"].to_str().unwrap(),
            "text/plain"
        );
    }

    #[test]
    fn test_title_from_query_decodes_values() {
        assert_eq!(
            title_from_query(Some("title=The%20Matrix")),
            Some("The Matrix".to_string())
        );
        assert_eq!(
            title_from_query(Some("title=up+down")),
            Some("up down".to_string())
        );
    }

    #[test]
    fn test_title_from_query_ignores_other_params() {
        assert_eq!(
            title_from_query(Some("year=2010&title=Inception")),
            Some("Inception".to_string())
        );
        assert_eq!(title_from_query(Some("year=2010")), None);
        assert_eq!(title_from_query(None), None);
    }

    #[test]
    fn test_title_from_path_decodes_segment() {
        assert_eq!(
            title_from_path("/movie/The%20Matrix"),
            Some("The Matrix".to_string())
        );
        assert_eq!(title_from_path("/movie/up"), Some("up".to_string()));
    }

    #[test]
    fn test_title_from_path_requires_movie_prefix() {
        assert_eq!(title_from_path("/sections"), None);
        assert_eq!(title_from_path("/movies/up"), None);
    }

    #[test]
    fn test_empty_path_segment_yields_empty_title() {
        // "/movie/" resolves to an empty title, rejected by the handler
        assert_eq!(title_from_path("/movie/"), Some(String::new()));
    }
}
