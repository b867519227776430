//! Response helpers outside the normal handler path.
//!
//! A panic anywhere below the catch-panic layer still answers with a
//! `server_error` envelope instead of dropping the connection.

use axum::response::{IntoResponse, Response};
use std::any::Any;

use crate::gateway::{Outcome, ResponseEnvelope};
use crate::observability::metrics;

/// Convert a caught panic payload into a `server_error` envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(error = %detail, "Handler panicked");
    metrics::record_outcome(Outcome::ServerError);
    ResponseEnvelope::server_error(detail).into_response()
}
