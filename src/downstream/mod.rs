//! Downstream conversational backend.
//!
//! # Data Flow
//! ```text
//! OutboundPayload { sender, message }
//!     → client.rs (JSON POST, bounded wait)
//!     → Ok(ReplySequence) | Err(BackendError)
//! ```
//!
//! # Design Decisions
//! - One attempt per call; failures are classified, never retried
//! - The timeout covers connect, send and body read together
//! - `ChatBackend` is the seam the gateway depends on, so the handler can be
//!   exercised without a network

pub mod client;
pub mod types;

pub use client::{BackendError, ChatBackend, RasaClient};
pub use types::{OutboundPayload, ReplyFragment, ReplySequence};
