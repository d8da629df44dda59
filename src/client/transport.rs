//! HTTP transport between the dashboard client and the monitoring API

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::{MonitorError, Result};

/// Request/response access to the API, one JSON document per call.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value>;
}

/// reqwest-backed transport. No retries: a failed call surfaces to the caller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, http_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(http_timeout)
            .user_agent(format!("datareon-monitor/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MonitorError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response(&self, response: Response, path: &str) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| MonitorError::Fetch(format!("undecodable body from {}: {}", path, e)));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v["message"].as_str().map(str::to_string));

        warn!("{} answered {}: {}", path, status, body);

        match message {
            Some(message) => Err(MonitorError::Api {
                status: status.as_u16(),
                message,
            }),
            None => Err(MonitorError::Fetch(format!("{} returned {}", path, status))),
        }
    }
}

fn request_failed(path: &str, error: reqwest::Error) -> MonitorError {
    MonitorError::Fetch(format!("request to {} failed: {}", path, error))
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        debug!("GET {}", self.url(path));
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| request_failed(path, e))?;
        self.handle_response(response, path).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        debug!("POST {}", self.url(path));
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| request_failed(path, e))?;
        self.handle_response(response, path).await
    }
}
