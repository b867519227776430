//! Client-facing response envelope.
//!
//! Every path through the gateway ends in exactly one [`ResponseEnvelope`]
//! and the HTTP status of its [`Outcome`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::downstream::ReplySequence;

pub const INVALID_REQUEST_TEXT: &str = "Please send your message in the correct format.";
pub const EMPTY_RESPONSE_TEXT: &str = "I'm still learning. Could you try rephrasing that?";
pub const FALLBACK_TEXT: &str = "I understand you but don't have a proper response configured yet.";
pub const TIMEOUT_TEXT: &str = "I'm taking too long to respond. Please try again shortly.";
pub const CONNECTION_TEXT: &str = "I can't connect to my backend service. Is the Rasa server running?";
pub const HTTP_ERROR_TEXT: &str = "There was an error processing your request.";
pub const SERVER_ERROR_TEXT: &str = "Something unexpected went wrong. Our team has been notified.";

/// Outcome tag reported in the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    EmptyResponse,
    InvalidRequest,
    TimeoutError,
    ConnectionError,
    HttpError,
    ServerError,
}

impl Outcome {
    pub fn status_code(self) -> StatusCode {
        match self {
            Outcome::Success | Outcome::EmptyResponse => StatusCode::OK,
            Outcome::InvalidRequest => StatusCode::BAD_REQUEST,
            Outcome::TimeoutError => StatusCode::GATEWAY_TIMEOUT,
            Outcome::ConnectionError => StatusCode::SERVICE_UNAVAILABLE,
            Outcome::HttpError => StatusCode::BAD_GATEWAY,
            Outcome::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::EmptyResponse => "empty_response",
            Outcome::InvalidRequest => "invalid_request",
            Outcome::TimeoutError => "timeout_error",
            Outcome::ConnectionError => "connection_error",
            Outcome::HttpError => "http_error",
            Outcome::ServerError => "server_error",
        }
    }
}

/// JSON body returned to the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub response: String,
    pub status: Outcome,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rasa_response: Option<ReplySequence>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rasa_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    fn new(status: Outcome, response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status,
            original_message: None,
            rasa_response: None,
            rasa_url: None,
            error_details: None,
            error: None,
        }
    }

    pub fn invalid_request() -> Self {
        Self::new(Outcome::InvalidRequest, INVALID_REQUEST_TEXT)
    }

    pub fn empty_response(original_message: &str) -> Self {
        Self {
            original_message: Some(original_message.to_string()),
            ..Self::new(Outcome::EmptyResponse, EMPTY_RESPONSE_TEXT)
        }
    }

    /// Successful reply. Blank `text` is replaced by the fallback sentence.
    pub fn success(text: String, original_message: &str, fragments: ReplySequence) -> Self {
        let text = if text.trim().is_empty() {
            FALLBACK_TEXT.to_string()
        } else {
            text
        };
        Self {
            original_message: Some(original_message.to_string()),
            rasa_response: Some(fragments),
            ..Self::new(Outcome::Success, text)
        }
    }

    pub fn timeout() -> Self {
        Self::new(Outcome::TimeoutError, TIMEOUT_TEXT)
    }

    pub fn connection_error(backend_url: &str) -> Self {
        Self {
            rasa_url: Some(backend_url.to_string()),
            ..Self::new(Outcome::ConnectionError, CONNECTION_TEXT)
        }
    }

    pub fn http_error(details: String) -> Self {
        Self {
            error_details: Some(details),
            ..Self::new(Outcome::HttpError, HTTP_ERROR_TEXT)
        }
    }

    pub fn server_error(error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(Outcome::ServerError, SERVER_ERROR_TEXT)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status.status_code()
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
