// File: bridge/src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::registry::RequestRegistry;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RequestRegistry>,
    pub static_dir: String,
}

impl AppState {
    pub fn new(registry: Arc<RequestRegistry>, static_dir: String) -> Self {
        Self {
            registry,
            static_dir,
        }
    }
}
