//! Chat gateway library.
//!
//! Forwards chat messages from a web client to a Rasa REST webhook and
//! normalizes the reply, or the failure, into a JSON envelope.

pub mod config;
pub mod downstream;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use gateway::{Gateway, Outcome, ResponseEnvelope};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
