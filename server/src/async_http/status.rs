//! Status route for asynchronous operations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tracing::debug;

use super::{AsyncHttpManager, Outcome};
use crate::constants::headers;

impl AsyncHttpManager {
    /// Answer a status poll for `id`.
    ///
    /// Lookup and removal happen under one exclusive lock, so a terminal
    /// state is handed to exactly one poller.
    pub async fn poll_status(&self, id: &str) -> Response {
        let mut operations = self.operations.write().await;

        let Some(operation) = operations.get(id) else {
            debug!(parent: &self.span, "Status requested for unknown id {}", id);
            return (StatusCode::NOT_FOUND, "Id not found").into_response();
        };

        let Some(outcome) = operation.outcome().cloned() else {
            return (StatusCode::OK, [(headers::PENDING, "true")]).into_response();
        };

        operations.remove(id);
        debug!(parent: &self.span, "Delivered result of {}: {:?}", id, outcome);

        match outcome {
            Outcome::Failed(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            Outcome::Redirected(location) => Redirect::to(&location).into_response(),
            Outcome::Completed => StatusCode::NO_CONTENT.into_response(),
        }
    }

    /// Router serving `GET {route}/{id}`, ready to be merged into an app.
    pub fn status_router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        Router::new()
            .route(&format!("{}/{{id}}", self.route), get(operation_status))
            .with_state(self.clone())
    }
}

async fn operation_status(
    State(manager): State<AsyncHttpManager>,
    Path(id): Path<String>,
) -> Response {
    manager.poll_status(&id).await
}
