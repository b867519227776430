//! Request identification.
//!
//! # Responsibilities
//! - Read the request ID assigned by the `x-request-id` middleware
//! - Open the per-request tracing span
//!
//! # Design Decisions
//! - Request ID added as early as possible (outermost layer) for tracing
//! - IDs supplied by the client are kept, missing ones get a UUID v4

use axum::body::Body;
use axum::http::Request;
use tracing::Span;

/// Header carrying the request ID, on both request and response.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID of an inbound request, or `"unknown"`.
pub fn request_id(request: &Request<Body>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Span wrapping everything logged while serving one request.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id(request),
        method = %request.method(),
        path = %request.uri().path(),
    )
}
