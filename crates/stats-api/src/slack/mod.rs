//! Slack adapters
//!
//! Inbound Events API envelope decoding and request signing, outbound Web API
//! delivery.

pub mod events;
pub mod publisher;
pub mod signature;

pub use events::{CallbackEvent, EventEnvelope, ReactionEvent};
pub use publisher::SlackPublisher;
pub use signature::{SignatureError, SignatureVerifier};
