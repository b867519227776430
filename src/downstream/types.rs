//! Wire types exchanged with the backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::gateway::sender::sender_id;

/// Body posted to the backend webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundPayload {
    /// Pseudo-session key derived from the message.
    pub sender: String,
    pub message: String,
}

impl OutboundPayload {
    /// Build the payload for a message, deriving its sender.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            sender: sender_id(&message),
            message,
        }
    }
}

/// One element of the backend reply.
///
/// Only `text` is interpreted; every other field (buttons, images, custom
/// payloads, ...) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplyFragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReplyFragment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            extra: Map::new(),
        }
    }
}

/// Ordered backend reply.
pub type ReplySequence = Vec<ReplyFragment>;
