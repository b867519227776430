//! Request handling for `POST /webhook`.
//!
//! # Responsibilities
//! - Validate the inbound body (`{"message": ...}`)
//! - Derive the sender and forward exactly once to the backend
//! - Map every result, including every backend failure, to an envelope
//!
//! # Design Decisions
//! - Validation short-circuits before any downstream call
//! - The original message travels inside the payload into every branch
//! - Nothing escapes as an error; the caller always gets an envelope

use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::downstream::{BackendError, ChatBackend, OutboundPayload, ReplySequence};
use crate::gateway::envelope::ResponseEnvelope;
use crate::gateway::normalizer::normalize;
use crate::observability::metrics;

/// Why an inbound body was rejected.
#[derive(Debug, Error)]
pub enum InvalidRequest {
    #[error("body is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    #[error("body is not a JSON object")]
    NotObject,

    #[error("'message' field is missing or null")]
    MissingMessage,

    #[error("'message' field is not a string")]
    NotString,
}

/// Extract the `message` string from a raw request body.
pub fn parse_inbound(body: &[u8]) -> Result<String, InvalidRequest> {
    let value: Value = serde_json::from_slice(body)?;
    let object = value.as_object().ok_or(InvalidRequest::NotObject)?;

    match object.get("message") {
        None | Some(Value::Null) => Err(InvalidRequest::MissingMessage),
        Some(Value::String(message)) => Ok(message.clone()),
        Some(_) => Err(InvalidRequest::NotString),
    }
}

/// The gateway core, shared by all inbound requests.
#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn ChatBackend>,
    timeout: Duration,
}

impl Gateway {
    pub fn new(backend: Arc<dyn ChatBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn backend_url(&self) -> &str {
        self.backend.url()
    }

    /// Handle one inbound body, producing the envelope and its HTTP status.
    pub async fn handle(&self, body: &[u8]) -> (StatusCode, ResponseEnvelope) {
        let start = Instant::now();

        let envelope = match parse_inbound(body) {
            Ok(message) => self.forward(message).await,
            Err(reason) => {
                tracing::error!(
                    reason = %reason,
                    body = %String::from_utf8_lossy(body),
                    "Invalid request format"
                );
                ResponseEnvelope::invalid_request()
            }
        };

        metrics::record_request(envelope.status, start);
        (envelope.status_code(), envelope)
    }

    /// Reject a request whose body could not even be read.
    pub fn reject(&self, reason: &str) -> (StatusCode, ResponseEnvelope) {
        tracing::error!(reason = %reason, "Invalid request format");
        let envelope = ResponseEnvelope::invalid_request();
        metrics::record_request(envelope.status, Instant::now());
        (envelope.status_code(), envelope)
    }

    async fn forward(&self, message: String) -> ResponseEnvelope {
        tracing::debug!(message = %message, "Received user message");

        let payload = OutboundPayload::new(message);
        tracing::debug!(
            sender = %payload.sender,
            message = %payload.message,
            backend_url = %self.backend.url(),
            "Sending to backend"
        );

        let started = Instant::now();
        let result = self.backend.send(&payload, self.timeout).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_backend_call(outcome, started.elapsed());

        match result {
            Ok(fragments) => self.reply(&payload, fragments),
            Err(err) => self.failure(&payload, err),
        }
    }

    fn reply(&self, payload: &OutboundPayload, fragments: ReplySequence) -> ResponseEnvelope {
        let raw = serde_json::to_string(&fragments).unwrap_or_default();
        tracing::debug!(raw = %raw, "Full backend response");

        if fragments.is_empty() {
            tracing::warn!(
                message = %payload.message,
                "Received empty response from backend"
            );
            return ResponseEnvelope::empty_response(&payload.message);
        }

        let text = normalize(&fragments);
        if text.is_empty() {
            tracing::warn!(raw = %raw, "Received responses but no text content");
        }

        let envelope = ResponseEnvelope::success(text, &payload.message, fragments);
        tracing::debug!(response = %envelope.response, "Sending response to client");
        envelope
    }

    fn failure(&self, payload: &OutboundPayload, err: BackendError) -> ResponseEnvelope {
        match &err {
            BackendError::Timeout(limit) => {
                tracing::error!(
                    message = %payload.message,
                    sender = %payload.sender,
                    timeout_ms = limit.as_millis() as u64,
                    "Timeout while waiting for backend"
                );
                ResponseEnvelope::timeout()
            }
            BackendError::Connection(detail) => {
                tracing::error!(
                    backend_url = %self.backend.url(),
                    message = %payload.message,
                    error = %detail,
                    "Could not connect to backend"
                );
                ResponseEnvelope::connection_error(self.backend.url())
            }
            BackendError::Http { status, body, .. } => {
                tracing::error!(
                    status = %status,
                    body = %body,
                    message = %payload.message,
                    "HTTP error from backend"
                );
                ResponseEnvelope::http_error(err.to_string())
            }
            BackendError::Other(detail) => {
                tracing::error!(
                    message = %payload.message,
                    sender = %payload.sender,
                    error = %detail,
                    "Unexpected error processing message"
                );
                ResponseEnvelope::server_error(err.to_string())
            }
        }
    }
}
