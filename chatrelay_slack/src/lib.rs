#![deny(
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

//! Slack side of the relay: signed Events API requests in, threaded
//! `chat.postMessage` replies out.

mod client;
mod command;
mod error;
pub mod event;
mod handler;
pub mod mention;
pub mod signature;

pub use client::{DEFAULT_API_BASE, SlackClient};
pub use command::Command;
pub use error::{Error, Result};
pub use event::{Event, EventEnvelope, MentionEvent};
pub use handler::{EventHandler, HandlerOutcome};
