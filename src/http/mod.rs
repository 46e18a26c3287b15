//! HTTP protocol layer module
//!
//! Response building, decoupled from the lookup business logic.

pub mod response;

// Re-export commonly used builders
pub use response::{build_banner_response, build_json_response};
