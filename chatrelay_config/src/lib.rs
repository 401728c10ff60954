mod schema;

pub use schema::{
    AgentDefaults, AgentsConfig, Config, ConversationConfig, ProviderConfig, ProvidersConfig,
    SlackConfig,
};
