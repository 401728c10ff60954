//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use chatrelay_config::Config;
use chatrelay_core::CompletionProvider;
use chatrelay_conversation::{RegistryConfig, SessionRegistry};
use chatrelay_providers::OpenAiProvider;
use std::sync::Arc;
use tracing::info;

mod chat;
mod info;
mod init;
mod relay;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use relay::{RelayInput, RelayStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build the provider from config.
fn build_provider(config: &Config) -> OpenAiProvider {
    let openai = &config.providers.openai;
    OpenAiProvider::new(openai.api_key.clone())
        .with_base_url(openai.base_url.clone())
        .with_organization(openai.organization.clone())
        .with_default_model(config.agents.defaults.model.clone())
        .with_timeout(config.request_timeout())
}

/// Build the session registry shared by every conversation of this process.
fn build_registry(
    config: &Config,
    model_override: Option<String>,
) -> anyhow::Result<Arc<SessionRegistry<OpenAiProvider>>> {
    config.validate_provider()?;

    let provider = build_provider(config);
    let model = model_override.unwrap_or_else(|| provider.get_default_model().to_string());
    info!("Using model {model}");

    let registry_config = RegistryConfig::default()
        .with_model(model)
        .with_seed(config.conversation.seed())
        .with_seed_mode(config.conversation.seed_mode);

    Ok(Arc::new(SessionRegistry::new(provider, registry_config)))
}
