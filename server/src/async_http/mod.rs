//! Asynchronous HTTP operations
//!
//! Turns a long-running request into an asynchronous interaction: the caller
//! gets `202 Accepted` with a `Location` pointing at a status route, the work
//! runs on its own task, and the caller polls until the operation resolves.
//!
//! # Status codes returned by the poll route
//!
//! - **200** with `X-Pending: true`: still running
//! - **404**: id unknown (never created, already consumed, or server restarted)
//! - **500**: work failed, body holds the error text
//! - **303**: work finished, result available at `Location`
//! - **204**: work finished with nothing to return
//!
//! A terminal status is delivered once; the operation is forgotten right
//! after, so the next poll for the same id gets 404.
//!
//! # Usage
//!
//! ```ignore
//! let manager = AsyncHttpManager::new("/queue");
//! let app = Router::new()
//!     .route("/nodes", post(add_node))
//!     .merge(manager.status_router())
//!     .with_state(manager);
//!
//! async fn add_node(State(manager): State<AsyncHttpManager>) -> Result<Response, AsyncHttpError> {
//!     manager
//!         .run_async(|| async {
//!             let id = provision().await?;
//!             Ok::<_, anyhow::Error>(Some(format!("/nodes/{}", id)))
//!         })
//!         .await
//! }
//! ```

mod handle;
mod status;

pub use handle::{AsyncHandle, Outcome};

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, error, info, info_span, instrument, warn, Instrument, Span};

use crate::constants::ids;
use crate::errors::AsyncHttpError;
use handle::Operation;

#[derive(Debug, Clone, Serialize)]
pub struct OperationSummary {
    pub total: usize,
    pub in_flight: usize,
    pub completed: usize,
    pub oldest_in_flight: Option<DateTime<Utc>>,
}

/// Registry of asynchronous operations reachable under one route prefix.
///
/// Cloning is cheap and every clone shares the same registry.
#[derive(Clone)]
pub struct AsyncHttpManager {
    route: Arc<str>,
    operations: Arc<RwLock<HashMap<String, Arc<Operation>>>>,
    span: Span,
    id_source: fn() -> String,
}

impl AsyncHttpManager {
    pub fn new(route: &str) -> Self {
        let span = info_span!("asynchttp", route = %route);
        Self::with_span(route, span)
    }

    /// Create a manager whose job tasks log under `span`.
    pub fn with_span(route: &str, span: Span) -> Self {
        Self {
            route: Arc::from(route.trim_end_matches('/')),
            operations: Arc::new(RwLock::new(HashMap::new())),
            span,
            id_source: new_operation_id,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Register a new pending operation.
    ///
    /// Prefer [`AsyncHttpManager::run_async`]; use this only when the work
    /// has to be driven by hand.
    #[instrument(skip(self), fields(route = %self.route))]
    pub async fn create_handle(&self) -> Result<AsyncHandle, AsyncHttpError> {
        let mut operations = self.operations.write().await;

        for _ in 0..ids::MAX_ATTEMPTS {
            let id = (self.id_source)();
            if operations.contains_key(&id) {
                warn!(parent: &self.span, "Generated operation id {} is already in use", id);
                continue;
            }

            let operation = Arc::new(Operation::new(id.clone()));
            operations.insert(id, operation.clone());
            return Ok(AsyncHandle::new(operation, &self.route));
        }

        error!(
            parent: &self.span,
            "Giving up on operation id generation after {} collisions",
            ids::MAX_ATTEMPTS
        );
        Err(AsyncHttpError::IdExhausted {
            attempts: ids::MAX_ATTEMPTS,
        })
    }

    /// Run `work` in the background and answer `202 Accepted` right away.
    ///
    /// When `work` resolves, an error completes the operation with that error,
    /// a non-empty location completes it with a redirect, and anything else
    /// completes it empty. A panic inside `work` is reported as a failure.
    pub async fn run_async<F, Fut, E>(&self, work: F) -> Result<Response, AsyncHttpError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Option<String>, E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        let handle = self.create_handle().await?;
        let location = handle.poll_url().to_string();
        let job_span = info_span!(parent: &self.span, "job", id = %handle.id());

        tokio::spawn(
            async move {
                info!("Started job {}", handle.id());
                let started = Instant::now();

                let result = AssertUnwindSafe(async move { work().await })
                    .catch_unwind()
                    .await;

                info!("Completed job {} in {:?}", handle.id(), started.elapsed());

                match result {
                    Ok(Err(e)) => {
                        warn!("Job {} failed: {}", handle.id(), e);
                        handle.complete_with_error(e);
                    }
                    Ok(Ok(Some(url))) if !url.is_empty() => handle.complete_with_location(url),
                    Ok(Ok(_)) => handle.complete_empty(),
                    Err(payload) => {
                        let reason = panic_message(&*payload);
                        error!("Job {} panicked: {}", handle.id(), reason);
                        handle.complete_with_error(format!("operation panicked: {}", reason));
                    }
                }
            }
            .instrument(job_span),
        );

        debug!(parent: &self.span, "Accepted operation, poll at {}", location);
        Ok((StatusCode::ACCEPTED, [(header::LOCATION, location)]).into_response())
    }

    /// Number of operations whose work has not finished yet
    pub async fn in_flight(&self) -> usize {
        let operations = self.operations.read().await;
        operations.values().filter(|op| !op.is_completed()).count()
    }

    pub async fn summary(&self) -> OperationSummary {
        let operations = self.operations.read().await;
        let pending: Vec<&Arc<Operation>> = operations
            .values()
            .filter(|op| !op.is_completed())
            .collect();

        OperationSummary {
            total: operations.len(),
            in_flight: pending.len(),
            completed: operations.len() - pending.len(),
            oldest_in_flight: pending.iter().map(|op| op.started_at()).min(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_id_source(mut self, id_source: fn() -> String) -> Self {
        self.id_source = id_source;
        self
    }

    #[cfg(test)]
    pub(crate) async fn is_tracked(&self, id: &str) -> bool {
        self.operations.read().await.contains_key(id)
    }
}

impl fmt::Debug for AsyncHttpManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncHttpManager")
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

/// Hex UUID, safe to use as a path segment without escaping.
fn new_operation_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
