use chatrelay_config::Config;
use chatrelay_core::SeedMode;

/// Strategy for displaying configuration information.
///
/// Credentials are masked; everything else is printed as loaded, after
/// environment overrides.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== chatrelay Configuration ===\n");

        let openai = &config.providers.openai;
        println!("OpenAI:");
        println!("  API Key: {}", mask(&openai.api_key));
        println!(
            "  Organization: {}",
            openai.organization.as_deref().unwrap_or("(not set)")
        );
        println!("  Base URL: {}", openai.base_url);
        println!();

        println!("Agent Defaults:");
        println!("  Model: {}", config.agents.defaults.model);
        let timeout = config
            .agents
            .defaults
            .request_timeout_secs
            .map_or_else(|| "(none)".to_string(), |secs| format!("{secs}s"));
        println!("  Request Timeout: {timeout}");
        println!();

        let conversation = &config.conversation;
        println!("Conversation:");
        println!("  Seed Mode: {}", seed_mode_name(conversation.seed_mode));
        println!("  Persona: {}", truncate(&conversation.persona, 60));
        println!(
            "  Example Question: {}",
            truncate(&conversation.example_question, 60)
        );
        println!();

        let slack = &config.slack;
        println!("Slack:");
        println!("  Bot Token: {}", mask(&slack.bot_token));
        println!("  Signing Secret: {}", mask(&slack.signing_secret));
        println!(
            "  Bot User: {}",
            slack.bot_user_id.as_deref().unwrap_or("(resolved at startup)")
        );
        println!("  API Base: {}", slack.api_base);

        Ok(())
    }
}

const fn seed_mode_name(mode: SeedMode) -> &'static str {
    match mode {
        SeedMode::Append => "append",
        SeedMode::Ask => "ask",
    }
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        "(not set)".to_string()
    } else if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_credentials() {
        assert_eq!(mask(""), "(not set)");
        assert_eq!(mask("short"), "***");
        assert_eq!(mask("sk-abcdefghijkl"), "sk-a...ijkl");
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }
}
