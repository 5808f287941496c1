//! Cluster, node and volume endpoints
//!
//! Creation and deletion run as asynchronous operations; reads are proxied
//! to the backend synchronously.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use tracing::info;

use crate::backend::Collection;
use crate::errors::ServerError;
use crate::web::AppState;

pub async fn create_resource(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, ServerError> {
    let collection: Collection = collection.parse()?;
    info!("Accepted create request for {}", collection);

    let backend = state.backend.clone();
    let response = state
        .async_manager
        .run_async(move || async move { backend.create(collection, body).await })
        .await?;

    Ok(response)
}

pub async fn delete_resource(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Response, ServerError> {
    let collection: Collection = collection.parse()?;
    info!("Accepted delete request for {} {}", collection, id);

    let backend = state.backend.clone();
    let response = state
        .async_manager
        .run_async(move || async move {
            backend.destroy(collection, &id).await?;
            Ok::<_, crate::errors::BackendError>(None)
        })
        .await?;

    Ok(response)
}

pub async fn list_resources(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Response, ServerError> {
    let collection: Collection = collection.parse()?;
    let (status, body) = state.backend.fetch(&collection.collection_path()).await?;
    Ok((status, Json(body)).into_response())
}

pub async fn get_resource(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Response, ServerError> {
    let collection: Collection = collection.parse()?;
    let (status, body) = state.backend.fetch(&collection.item_path(&id)).await?;
    Ok((status, Json(body)).into_response())
}
