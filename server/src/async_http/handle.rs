//! Completion state of a single asynchronous operation
//!
//! The outcome lives in a write-once cell owned by the operation itself, so
//! completing an operation never touches the registry lock. The public
//! [`AsyncHandle`] is move-only and consumed by completion; the cell still
//! panics on a second write for any internal caller that gets around that.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Terminal state of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Work failed; the message is relayed to the poller as-is
    Failed(String),
    /// Work succeeded and the result can be fetched from this location
    Redirected(String),
    /// Work succeeded with nothing to return
    Completed,
}

#[derive(Debug)]
pub(crate) struct Operation {
    id: String,
    started_at: DateTime<Utc>,
    outcome: OnceLock<Outcome>,
}

impl Operation {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            started_at: Utc::now(),
            outcome: OnceLock::new(),
        }
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(crate) fn outcome(&self) -> Option<&Outcome> {
        self.outcome.get()
    }

    pub(crate) fn is_completed(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Record the terminal state. Panics if the operation already has one.
    pub(crate) fn complete(&self, outcome: Outcome) {
        if let Outcome::Redirected(location) = &outcome {
            assert!(
                !location.is_empty(),
                "operation {} completed with an empty redirect location",
                self.id
            );
        }

        if let Err(rejected) = self.outcome.set(outcome) {
            panic!(
                "operation {} completed twice (already {:?}, attempted {:?})",
                self.id,
                self.outcome.get(),
                rejected
            );
        }
    }
}

/// Handle to a pending operation, held by whoever performs the work.
pub struct AsyncHandle {
    operation: Arc<Operation>,
    url: String,
}

impl AsyncHandle {
    pub(crate) fn new(operation: Arc<Operation>, route: &str) -> Self {
        let url = format!("{}/{}", route, operation.id());
        Self { operation, url }
    }

    pub fn id(&self) -> &str {
        self.operation.id()
    }

    /// Location where the operation's status can be polled
    pub fn poll_url(&self) -> &str {
        &self.url
    }

    pub fn complete_with_error(self, err: impl fmt::Display) {
        self.operation.complete(Outcome::Failed(err.to_string()));
    }

    /// Finish successfully, pointing the poller at `location`.
    ///
    /// # Panics
    ///
    /// If `location` is empty. Use [`AsyncHandle::complete_empty`] instead.
    pub fn complete_with_location(self, location: impl Into<String>) {
        self.operation.complete(Outcome::Redirected(location.into()));
    }

    pub fn complete_empty(self) {
        self.operation.complete(Outcome::Completed);
    }
}

impl fmt::Debug for AsyncHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncHandle")
            .field("id", &self.operation.id())
            .field("url", &self.url)
            .finish()
    }
}
