//! HTTP response building module
//!
//! The single point where handler results become wire responses, so every
//! endpoint shares the same formatting: pretty-printed JSON with an
//! explicit Content-Length.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::logger;

/// Banner served on `GET /`.
const BANNER: &str = "Movie API: GET /sections and GET /movie?title=...";

/// Build a pretty-printed JSON response.
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string_pretty(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return fallback_500();
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            fallback_500()
        })
}

/// Build the plain-text banner response for `GET /`.
pub fn build_banner_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .header("Content-Length", BANNER.len())
        .body(Full::new(Bytes::from(BANNER)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from(BANNER))))
}

/// Canned 500 used when a response itself cannot be produced.
fn fallback_500() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"error":"Internal server error"}"#)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))))
}
