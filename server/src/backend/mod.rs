//! Storage backend communication
//!
//! The gateway owns no resource logic. Every cluster, node and volume request
//! is relayed to the storage-orchestration backend and its JSON is passed
//! through untouched.
//!
//! # Communication Pattern
//!
//! ```text
//! Client → Gateway ──POST/DELETE──→ background job → Backend
//!            │                            │
//!            └─ 202 + Location       outcome → status route
//!
//! Client → Gateway ──GET──→ Backend (proxied synchronously)
//! ```

pub mod client;

pub use client::BackendClient;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::errors::ServerError;

/// Resource collections served by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Clusters,
    Nodes,
    Volumes,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Clusters => "clusters",
            Collection::Nodes => "nodes",
            Collection::Volumes => "volumes",
        }
    }

    pub fn collection_path(&self) -> String {
        format!("/{}", self.as_str())
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("/{}/{}", self.as_str(), id)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clusters" => Ok(Collection::Clusters),
            "nodes" => Ok(Collection::Nodes),
            "volumes" => Ok(Collection::Volumes),
            other => Err(ServerError::UnknownCollection {
                name: other.to_string(),
            }),
        }
    }
}
