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

use async_trait::async_trait;

pub mod error;
pub mod message;
pub mod prompt;
pub mod reply;

pub use error::{ProviderError, ProviderErrorKind};
pub use message::{Message, Role};
pub use prompt::SeedMode;
pub use reply::Reply;

/// A completion service that, given a full transcript, returns the next turn.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, model: &str, transcript: &[Message])
    -> Result<Message, ProviderError>;

    fn get_default_model(&self) -> &str;
}

#[async_trait]
impl<P> CompletionProvider for std::sync::Arc<P>
where
    P: CompletionProvider + ?Sized,
{
    async fn complete(
        &self,
        model: &str,
        transcript: &[Message],
    ) -> Result<Message, ProviderError> {
        (**self).complete(model, transcript).await
    }

    fn get_default_model(&self) -> &str {
        (**self).get_default_model()
    }
}
