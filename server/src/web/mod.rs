pub mod auth;
pub mod handlers;
pub mod server;
pub mod throttle;

pub use server::{create_router, start_web_server};

use std::sync::Arc;

use crate::async_http::AsyncHttpManager;
use crate::backend::BackendClient;
use crate::config::Config;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub async_manager: AsyncHttpManager,
    pub backend: Arc<BackendClient>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        async_manager: AsyncHttpManager,
        backend: Arc<BackendClient>,
    ) -> Self {
        Self {
            config,
            async_manager,
            backend,
        }
    }
}
