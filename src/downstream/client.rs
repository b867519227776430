//! HTTP client for the Rasa REST webhook.
//!
//! # Responsibilities
//! - POST the payload as JSON to the configured URL
//! - Enforce the caller's timeout over the whole exchange
//! - Classify failures: timeout, unreachable, non-2xx, anything else

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::config::BackendConfig;
use crate::downstream::types::{OutboundPayload, ReplySequence};

/// Failure of a single downstream call.
///
/// Variants are mutually exclusive; when a transport error could be read as
/// more than one kind, timeout wins over connection.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no reply from backend within {} ms", .0.as_millis())]
    Timeout(Duration),

    #[error("backend unreachable: {0}")]
    Connection(String),

    #[error("{status} from {url}: {body}")]
    Http {
        status: StatusCode,
        url: String,
        body: String,
    },

    #[error("{0}")]
    Other(String),
}

impl BackendError {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Timeout(_) => "timeout",
            BackendError::Connection(_) => "connection",
            BackendError::Http { .. } => "http",
            BackendError::Other(_) => "other",
        }
    }

    /// Classify a failure that happened before any response arrived.
    ///
    /// Refused, reset or aborted connections all land here as `is_request`
    /// errors; only builder and redirect errors are left for `Other`.
    fn from_send(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            BackendError::Timeout(timeout)
        } else if err.is_connect() || err.is_request() {
            BackendError::Connection(err.to_string())
        } else {
            BackendError::Other(format!("backend request failed: {}", err))
        }
    }

    /// Classify a failure while reading a response body.
    fn from_body(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            BackendError::Timeout(timeout)
        } else {
            BackendError::Other(format!("failed to read backend reply: {}", err))
        }
    }
}

/// A conversational backend the gateway can forward messages to.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one payload and wait at most `timeout` for the parsed reply.
    async fn send(
        &self,
        payload: &OutboundPayload,
        timeout: Duration,
    ) -> Result<ReplySequence, BackendError>;

    /// The endpoint this backend posts to.
    fn url(&self) -> &str;
}

/// Client for a Rasa `rest` channel webhook.
#[derive(Debug, Clone)]
pub struct RasaClient {
    client: reqwest::Client,
    url: String,
}

impl RasaClient {
    /// Build a client from the backend section of the configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    async fn exchange(
        &self,
        payload: &OutboundPayload,
        timeout: Duration,
    ) -> Result<ReplySequence, BackendError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| BackendError::from_send(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) if e.is_timeout() => return Err(BackendError::Timeout(timeout)),
                Err(e) => {
                    tracing::warn!(status = %status, error = %e, "Failed to read backend error body");
                    format!("<unreadable body: {}>", e)
                }
            };
            return Err(BackendError::Http {
                status,
                url: self.url.clone(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::from_body(e, timeout))?;

        serde_json::from_slice::<ReplySequence>(&bytes)
            .map_err(|e| BackendError::Other(format!("malformed backend reply: {}", e)))
    }
}

#[async_trait]
impl ChatBackend for RasaClient {
    async fn send(
        &self,
        payload: &OutboundPayload,
        timeout: Duration,
    ) -> Result<ReplySequence, BackendError> {
        match tokio::time::timeout(timeout, self.exchange(payload, timeout)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(timeout)),
        }
    }

    fn url(&self) -> &str {
        &self.url
    }
}
