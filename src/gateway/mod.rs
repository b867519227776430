//! Message gateway: the decision-making core.
//!
//! # Data Flow
//! ```text
//! POST /webhook body
//!     → handler.rs (validate, derive sender)
//!     → downstream client (one bounded call)
//!     → normalizer.rs (fragments → display text)
//!     → envelope.rs (status tag, HTTP status, diagnostics)
//! ```

pub mod envelope;
pub mod handler;
pub mod normalizer;
pub mod sender;

pub use envelope::{Outcome, ResponseEnvelope};
pub use handler::Gateway;
pub use normalizer::normalize;
pub use sender::sender_id;
