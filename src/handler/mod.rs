//! Request handler module
//!
//! Request routing dispatch and the lookup endpoint handlers.

pub mod lookup;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
