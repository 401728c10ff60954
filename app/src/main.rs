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

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod command;

use command::{
    ChatInput, ChatStrategy, CommandStrategy, InfoStrategy, InitStrategy, RelayInput,
    RelayStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(about = "Slack to chat-completion relay with per-user memory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to the assistant from the terminal
    Chat {
        /// User id the conversation belongs to
        #[arg(short = 'u', long, default_value = "cli:default")]
        user: String,

        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,
    },
    /// Handle signed Slack event requests read as JSON lines from stdin
    Relay {
        /// Bot user id; looked up with `auth.test` when neither this nor the
        /// config sets it
        #[arg(long)]
        bot_user_id: Option<String>,
    },
    /// Show configuration
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            user,
            message,
            model,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    user,
                    message,
                    model,
                })
                .await
        }
        Commands::Relay { bot_user_id } => {
            RelayStrategy.execute(RelayInput { bot_user_id }).await
        }
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
