// File: server/src/backend/client.rs
use anyhow::{anyhow, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::Collection;
use crate::errors::BackendError;

pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build backend HTTP client: {}", e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a resource and return the gateway path where it can be read back.
    #[instrument(skip(self, body), fields(collection = %collection))]
    pub async fn create(
        &self,
        collection: Collection,
        body: Value,
    ) -> Result<Option<String>, BackendError> {
        let url = format!("{}{}", self.base_url, collection.collection_path());
        info!("Creating resource in {}", collection);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| connection_failed(&url, e))?;

        let response = Self::ensure_success(response).await?;
        let created = Self::read_json(&url, response).await?;

        match resource_id(&created) {
            Some(id) => {
                info!("Backend created {} {}", collection, id);
                Ok(Some(collection.item_path(&id)))
            }
            None => {
                warn!("Backend response for new {} carried no id", collection);
                Ok(None)
            }
        }
    }

    #[instrument(skip(self), fields(collection = %collection))]
    pub async fn destroy(&self, collection: Collection, id: &str) -> Result<(), BackendError> {
        let url = format!("{}{}", self.base_url, collection.item_path(id));
        info!("Deleting {} {}", collection, id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| connection_failed(&url, e))?;

        Self::ensure_success(response).await?;
        info!("Backend deleted {} {}", collection, id);
        Ok(())
    }

    /// Read `path` from the backend, passing its status through.
    pub async fn fetch(&self, path: &str) -> Result<(StatusCode, Value), BackendError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Proxying GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| connection_failed(&url, e))?;

        let status = response.status();
        let body = Self::read_json(&url, response).await?;
        Ok((status, body))
    }

    async fn ensure_success(response: Response) -> Result<Response, BackendError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        warn!("Backend returned {}: {}", status, message.trim());

        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Empty bodies become `null`; non-JSON text is kept as a string.
    async fn read_json(url: &str, response: Response) -> Result<Value, BackendError> {
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::InvalidResponse {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

fn connection_failed(url: &str, err: reqwest::Error) -> BackendError {
    BackendError::ConnectionFailed {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

fn resource_id(body: &Value) -> Option<String> {
    match body.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
