pub mod config;
pub mod constants;
pub mod errors;
pub mod registry;
pub mod types;
pub mod web;

// Re-export commonly used types
pub use config::BridgeConfig;
pub use registry::RequestRegistry;
pub use types::{PendingRequest, RequestPayload, RequestResult};
pub use web::{create_router, start_web_server, AppState};
