// Server module entry point
// Listener creation and per-connection HTTP serving

pub mod connection;
pub mod listener;

// Re-export commonly used functions
pub use connection::accept_connection;
pub use listener::create_listener;
