//! Pseudo-session identifiers.
//!
//! The backend keys conversation state on `sender`. The gateway has no
//! sessions, so the sender is derived from the message itself: the first
//! eight bytes of its SHA-256 digest, read big-endian, reduced modulo
//! 10 000. The mapping is stable across restarts and hosts. Identical
//! messages share a sender and unrelated messages may collide.

use sha2::{Digest, Sha256};

pub const SENDER_PREFIX: &str = "user_";
pub const SENDER_BUCKETS: u64 = 10_000;

/// Deterministic 64-bit hash of the message bytes.
pub fn stable_hash(message: &str) -> u64 {
    let digest = Sha256::digest(message.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Sender label for a message, e.g. `user_5342`.
pub fn sender_id(message: &str) -> String {
    format!("{}{}", SENDER_PREFIX, stable_hash(message) % SENDER_BUCKETS)
}
