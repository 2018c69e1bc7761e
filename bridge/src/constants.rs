//! Application-wide constants for timeouts, defaults, and messages

use std::time::Duration;

/// Request registry constants
pub mod registry {
    use super::Duration;

    /// How long a request may stay pending before it is auto-rejected
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

    /// Rejection message delivered when the timeout fires
    pub const TIMEOUT_MESSAGE: &str = "Request timed out after 5 minutes";

    /// Rejection message for a cancel with no explicit reason
    pub const DEFAULT_CANCEL_REASON: &str = "Request cancelled";
}

/// HTTP server constants
pub mod server {
    /// The bridge is only ever reachable from the local machine
    pub const BIND_HOST: &str = "127.0.0.1";

    /// Default port for the bridge HTTP server
    pub const DEFAULT_PORT: u16 = 8765;

    /// Default directory holding the prebuilt UI bundle
    pub const DEFAULT_STATIC_DIR: &str = "ui/dist";

    /// Entry document served for SPA routes
    pub const INDEX_FILE: &str = "index.html";
}
