use crate::constants::routes;
use crate::web::{auth, handlers, throttle, AppState};
use anyhow::Result;
use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn start_web_server(state: AppState) -> Result<()> {
    let addr = state.config.bind_address();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let status_routes: Router<AppState> = state.async_manager.status_router();

    Router::new()
        .route(routes::HELLO, get(handlers::hello))
        // === OPERATION ROUTES ===
        .route(routes::OPERATIONS, get(handlers::get_operations_summary))
        .merge(status_routes)
        // === RESOURCE ROUTES (clusters, nodes, volumes) ===
        .route(
            "/{collection}",
            get(handlers::list_resources).post(handlers::create_resource),
        )
        .route(
            "/{collection}/{id}",
            get(handlers::get_resource).delete(handlers::delete_resource),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            throttle::limit_in_flight,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
