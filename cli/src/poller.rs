//! Client side of the asynchronous operation protocol
//!
//! After a `202 Accepted` the gateway hands out a status location. The poller
//! GETs it until the operation stops reporting `X-Pending: true`, then turns
//! the terminal answer into a result:
//!
//! | Status                      | Result                               |
//! |-----------------------------|--------------------------------------|
//! | 200 + `X-Pending: true`     | sleep, poll again                    |
//! | 303 See Other               | fetch `Location`, return its JSON    |
//! | 204 No Content              | done, nothing to show                |
//! | 200 without the header      | return the body                      |
//! | 404                         | `ClientError::NotFound`              |
//! | anything else               | `ClientError::Server` with the body  |
//!
//! Redirects are followed by hand so the 303 is visible to the loop.

use reqwest::{redirect, Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::constants::headers;
use crate::errors::ClientError;

/// Terminal result of an asynchronous operation
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Operation produced a resource, either via redirect or directly
    Resource(Value),
    /// Operation finished with nothing to report
    NoContent,
}

pub struct Poller {
    client: Client,
    base_url: String,
    interval: Duration,
    timeout: Option<Duration>,
    api_key: Option<String>,
}

impl Poller {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| ClientError::transport(&config.server_url, e))?;

        Ok(Self {
            client,
            base_url: config.server_url.clone(),
            interval: config.poll_interval,
            timeout: config.timeout,
            api_key: config.api_key.clone(),
        })
    }

    /// Absolute URL for a location that may be relative to the server
    pub fn resolve(&self, location: &str) -> String {
        if location.starts_with("http://") || location.starts_with("https://") {
            location.to_string()
        } else if location.starts_with('/') {
            format!("{}{}", self.base_url, location)
        } else {
            format!("{}/{}", self.base_url, location)
        }
    }

    /// Wait for the operation at `location` to finish
    pub async fn wait(&self, location: &str) -> Result<PollOutcome, ClientError> {
        let url = self.resolve(location);
        let started = Instant::now();
        let mut polls: u64 = 0;

        loop {
            let response = authorize(self.client.get(&url), self.api_key.as_deref())
                .send()
                .await
                .map_err(|e| ClientError::transport(&url, e))?;
            polls += 1;

            if is_pending(&response) {
                if let Some(timeout) = self.timeout {
                    let waited = started.elapsed();
                    if waited >= timeout {
                        return Err(ClientError::Timeout {
                            location: location.to_string(),
                            waited,
                        });
                    }
                }
                debug!("Operation {} still pending (poll {})", location, polls);
                sleep(self.interval).await;
                continue;
            }

            info!(
                "Operation {} finished with {} after {} polls in {:.1}s",
                location,
                response.status(),
                polls,
                started.elapsed().as_secs_f64()
            );
            return self.settle(&url, response).await;
        }
    }

    async fn settle(&self, url: &str, response: Response) -> Result<PollOutcome, ClientError> {
        match response.status() {
            StatusCode::SEE_OTHER => {
                let target = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(ClientError::MissingLocation)?
                    .to_string();
                let value = self.fetch(&target).await?;
                Ok(PollOutcome::Resource(value))
            }
            StatusCode::NO_CONTENT => Ok(PollOutcome::NoContent),
            StatusCode::OK => Ok(PollOutcome::Resource(read_json(url, response).await?)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                location: url.to_string(),
            }),
            status => Err(server_error(status, response).await),
        }
    }

    /// GET a resource and return its JSON body
    pub async fn fetch(&self, location: &str) -> Result<Value, ClientError> {
        let url = self.resolve(location);
        debug!("Fetching {}", url);

        let response = authorize(self.client.get(&url), self.api_key.as_deref())
            .send()
            .await
            .map_err(|e| ClientError::transport(&url, e))?;

        match response.status() {
            status if status.is_success() => read_json(&url, response).await,
            StatusCode::NOT_FOUND => Err(ClientError::NotFound { location: url }),
            status => Err(server_error(status, response).await),
        }
    }
}

pub(crate) fn authorize(request: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    match api_key {
        Some(key) => request.bearer_auth(key),
        None => request,
    }
}

fn is_pending(response: &Response) -> bool {
    response.status() == StatusCode::OK
        && response
            .headers()
            .get(headers::PENDING)
            .and_then(|v| v.to_str().ok())
            == Some("true")
}

pub(crate) async fn read_json(url: &str, response: Response) -> Result<Value, ClientError> {
    let text = response
        .text()
        .await
        .map_err(|e| ClientError::transport(url, e))?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) async fn server_error(status: StatusCode, response: Response) -> ClientError {
    ClientError::Server {
        status: status.as_u16(),
        message: response.text().await.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locations() {
        let poller = Poller::new(&ClientConfig::new("http://gateway:8080")).unwrap();

        assert_eq!(poller.resolve("/queue/abc"), "http://gateway:8080/queue/abc");
        assert_eq!(poller.resolve("queue/abc"), "http://gateway:8080/queue/abc");
        assert_eq!(
            poller.resolve("http://elsewhere:9000/nodes/1"),
            "http://elsewhere:9000/nodes/1"
        );
    }
}
