// File: server/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, info_span};
use tracing_subscriber::{fmt, EnvFilter};

use server::constants::defaults;
use server::web::start_web_server;
use server::{AppState, AsyncHttpManager, BackendClient, ConfigManager};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("server=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting storage gateway");

    let config_dir =
        std::env::var("SERVER_CONFIG_DIR").unwrap_or_else(|_| defaults::CONFIG_DIR.to_string());
    let config_manager = ConfigManager::new(config_dir).await?;
    let config = config_manager.get_current_config();

    let backend = Arc::new(BackendClient::new(
        &config.backend_url,
        Duration::from_secs(config.backend_timeout_seconds),
    )?);
    info!("Backend client initialized for {}", backend.base_url());

    let async_manager = AsyncHttpManager::with_span(
        &config.queue_route,
        info_span!("asynchttp", route = %config.queue_route),
    );
    info!(
        "Async operation manager initialized (status route {}/{{id}})",
        async_manager.route()
    );

    if let Some(max_in_flight) = config.max_in_flight {
        info!("Throttling new operations above {} in flight", max_in_flight);
    }

    start_web_server(AppState::new(config, async_manager, backend)).await?;

    Ok(())
}
