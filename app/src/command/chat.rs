//! Terminal conversation through the same registry the Slack relay uses.

use chatrelay_config::Config;
use chatrelay_core::Reply;
use std::io::Write;
use tracing::{debug, info};

use super::build_registry;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// User the conversation belongs to
    pub user: String,
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Optional model override
    pub model: Option<String>,
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let registry = build_registry(&config, input.model)?;
        let user = input.user;

        if let Some(msg) = input.message {
            let reply = registry.ask(&user, &msg).await;
            println!("{}", reply.text());
            if let Reply::Failure { kind, .. } = reply {
                anyhow::bail!("completion failed ({kind:?})");
            }
            return Ok(());
        }

        println!("=== Conversation as {user} ===");
        println!("Type 'reset' to clear the history, 'exit' or 'quit' to leave.\n");

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if std::io::stdin().read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();

            match line {
                "" => continue,
                "exit" | "quit" | "q" => break,
                "reset" => {
                    if registry.reset(&user).await {
                        println!("\nHistory cleared.\n");
                    } else {
                        println!("\nNothing to clear yet.\n");
                    }
                    continue;
                }
                _ => {}
            }

            let reply = registry.ask(&user, line).await;
            match &reply {
                Reply::Message(message) => println!("\n{}\n", message.content()),
                Reply::Failure { description, .. } => eprintln!("Error: {description}"),
            }

            if let Some(session) = registry.get(&user).await {
                debug!("Transcript holds {} turns", session.lock().await.len());
            }
        }

        info!("Conversation with {user} ended");
        Ok(())
    }
}
