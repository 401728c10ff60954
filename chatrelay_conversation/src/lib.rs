#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Per-user conversation state.
//!
//! Every user talking to the bot owns one [`ConversationSession`]: an
//! ordered transcript that is replayed in full to the completion provider on
//! each turn. The [`SessionRegistry`] creates sessions lazily on first
//! contact, seeds them with the configured system turns, and serializes
//! concurrent turns of the same user behind a per-session lock.

mod registry;
mod session;

pub use registry::{RegistryConfig, SessionRegistry, SharedSession};
pub use session::ConversationSession;
