// File: cli/src/client.rs
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::poller::{authorize, read_json, server_error, PollOutcome, Poller};

pub const CLUSTERS: &str = "clusters";
pub const NODES: &str = "nodes";
pub const VOLUMES: &str = "volumes";

/// Typed client for the storage gateway
///
/// Requests answered with `202 Accepted` are followed through the status
/// route until they settle; `200`/`201` answers are read directly.
pub struct HeketiClient {
    config: ClientConfig,
    client: Client,
    poller: Poller,
}

impl HeketiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let poller = Poller::new(&config)?;
        Ok(Self {
            config,
            client: Client::new(),
            poller,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }

    #[instrument(skip(self, body))]
    pub async fn create(&self, collection: &str, body: &Value) -> Result<Option<Value>, ClientError> {
        let url = format!("{}/{}", self.config.server_url, collection);
        let response = self.send(Method::POST, &url, Some(body)).await?;
        self.settle(&url, response).await
    }

    #[instrument(skip(self))]
    pub async fn destroy(&self, collection: &str, id: &str) -> Result<(), ClientError> {
        let url = format!("{}/{}/{}", self.config.server_url, collection, id);
        let response = self.send(Method::DELETE, &url, None).await?;
        self.settle(&url, response).await?;
        info!("Destroyed {} {}", collection, id);
        Ok(())
    }

    pub async fn list(&self, collection: &str) -> Result<Value, ClientError> {
        let url = format!("{}/{}", self.config.server_url, collection);
        let response = self.send(Method::GET, &url, None).await?;
        Ok(self.settle(&url, response).await?.unwrap_or(Value::Null))
    }

    pub async fn info(&self, collection: &str, id: &str) -> Result<Value, ClientError> {
        let url = format!("{}/{}/{}", self.config.server_url, collection, id);
        let response = self.send(Method::GET, &url, None).await?;
        Ok(self.settle(&url, response).await?.unwrap_or(Value::Null))
    }

    pub async fn cluster_create(&self) -> Result<Option<Value>, ClientError> {
        self.create(CLUSTERS, &json!({})).await
    }

    pub async fn cluster_destroy(&self, id: &str) -> Result<(), ClientError> {
        self.destroy(CLUSTERS, id).await
    }

    pub async fn node_add(
        &self,
        cluster: &str,
        zone: u32,
        manage_hostname: &str,
        storage_hostname: &str,
    ) -> Result<Option<Value>, ClientError> {
        let request = json!({
            "cluster": cluster,
            "zone": zone,
            "hostnames": {
                "manage": [manage_hostname],
                "storage": [storage_hostname],
            }
        });
        self.create(NODES, &request).await
    }

    pub async fn node_destroy(&self, id: &str) -> Result<(), ClientError> {
        self.destroy(NODES, id).await
    }

    pub async fn volume_create(
        &self,
        size_gb: u64,
        name: Option<&str>,
    ) -> Result<Option<Value>, ClientError> {
        let mut request = json!({ "size": size_gb });
        if let Some(name) = name {
            request["name"] = json!(name);
        }
        self.create(VOLUMES, &request).await
    }

    pub async fn volume_destroy(&self, id: &str) -> Result<(), ClientError> {
        self.destroy(VOLUMES, id).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, ClientError> {
        debug!("{} {}", method, url);
        let mut request = authorize(self.client.request(method, url), self.config.api_key.as_deref());
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| ClientError::transport(url, e))
    }

    async fn settle(&self, url: &str, response: Response) -> Result<Option<Value>, ClientError> {
        match response.status() {
            StatusCode::ACCEPTED => {
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(ClientError::MissingLocation)?
                    .to_string();
                debug!("Request to {} accepted, polling {}", url, location);

                match self.poller.wait(&location).await? {
                    PollOutcome::Resource(value) => Ok(Some(value)),
                    PollOutcome::NoContent => Ok(None),
                }
            }
            StatusCode::NO_CONTENT => Ok(None),
            StatusCode::OK | StatusCode::CREATED => Ok(Some(read_json(url, response).await?)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                location: url.to_string(),
            }),
            status => Err(server_error(status, response).await),
        }
    }
}
