//! Long-running Slack relay fed with raw event requests.
//!
//! The HTTP endpoint Slack calls is owned by the host: it forwards every
//! request as one JSON line on stdin,
//! `{"timestamp": "...", "signature": "...", "body": "..."}`, and reads one
//! JSON line per request back from stdout. Sessions live as long as this
//! process.

use std::sync::Arc;

use chatrelay_config::Config;
use chatrelay_core::CompletionProvider;
use chatrelay_slack::{EventHandler, HandlerOutcome, SlackClient};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use super::build_registry;

/// Input for the relay command.
#[derive(Debug, Clone)]
pub struct RelayInput {
    /// Bot user id override; looked up with `auth.test` when absent
    pub bot_user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForwardedRequest {
    /// Host-assigned id echoed back with the outcome
    #[serde(default)]
    id: Option<String>,
    timestamp: String,
    signature: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct RelayResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    challenge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RelayResponse {
    fn from_outcome(id: Option<String>, outcome: chatrelay_slack::Result<HandlerOutcome>) -> Self {
        let (status, challenge, error) = match outcome {
            Ok(HandlerOutcome::Challenge(challenge)) => ("challenge", Some(challenge), None),
            Ok(HandlerOutcome::Replied(reply)) if reply.is_success() => ("replied", None, None),
            Ok(HandlerOutcome::Replied(reply)) => {
                ("provider_failed", None, Some(reply.text().to_string()))
            }
            Ok(HandlerOutcome::Command(_)) => ("command", None, None),
            Ok(HandlerOutcome::Ignored) => ("ignored", None, None),
            Err(e) => ("rejected", None, Some(e.to_string())),
        };
        Self {
            id,
            status,
            challenge,
            error,
        }
    }

    fn malformed(err: &serde_json::Error) -> Self {
        Self {
            id: None,
            status: "rejected",
            challenge: None,
            error: Some(format!("Malformed request line: {err}")),
        }
    }
}

/// Strategy for running the Slack relay.
#[derive(Debug, Clone, Copy)]
pub struct RelayStrategy;

impl super::CommandStrategy for RelayStrategy {
    type Input = RelayInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        config.validate_slack()?;

        let registry = build_registry(&config, None)?;
        let client = SlackClient::new(config.slack.bot_token.clone())
            .with_api_base(config.slack.api_base.clone());
        let signing_secret = config.slack.signing_secret.clone();

        let handler = match input.bot_user_id.or_else(|| config.slack.bot_user_id.clone()) {
            Some(bot_user_id) => EventHandler::new(registry, client, bot_user_id, signing_secret),
            None => EventHandler::connect(registry, client, signing_secret).await?,
        };

        info!(
            "Slack relay is running as {}. Reading requests from stdin.",
            handler.bot_user_id()
        );

        let mut stdout = tokio::io::stdout();
        let handled = serve(
            Arc::new(handler),
            BufReader::new(tokio::io::stdin()),
            &mut stdout,
        )
        .await?;

        info!("stdin closed after {handled} requests, relay stopping");
        Ok(())
    }
}

/// Handle every request line from `reader` concurrently and write one
/// outcome line per request to `writer`.
///
/// Returns once `reader` is exhausted and every request has finished.
async fn serve<P, R, W>(
    handler: Arc<EventHandler<P>>,
    reader: R,
    writer: &mut W,
) -> anyhow::Result<usize>
where
    P: CompletionProvider + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut tasks = JoinSet::new();
    let mut handled = 0;
    let mut reading = true;

    while reading || !tasks.is_empty() {
        tokio::select! {
            line = lines.next_line(), if reading => {
                let Some(line) = line? else {
                    reading = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                handled += 1;

                match serde_json::from_str::<ForwardedRequest>(&line) {
                    Ok(request) => {
                        let handler = Arc::clone(&handler);
                        tasks.spawn(async move { process(&handler, request).await });
                    }
                    Err(e) => {
                        warn!("Malformed request line: {e}");
                        let response = RelayResponse::malformed(&e);
                        write_response(writer, &response).await?;
                    }
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                match joined {
                    Ok(response) => write_response(writer, &response).await?,
                    Err(e) => error!("Request task failed: {e}"),
                }
            }
            else => break,
        }
    }

    Ok(handled)
}

async fn process<P>(handler: &EventHandler<P>, request: ForwardedRequest) -> RelayResponse
where
    P: CompletionProvider,
{
    let outcome = handler
        .handle_request(
            &request.timestamp,
            &request.signature,
            request.body.as_bytes(),
        )
        .await;
    if let Err(e) = &outcome {
        error!("Request failed: {e}");
    }
    RelayResponse::from_outcome(request.id, outcome)
}

async fn write_response<W>(writer: &mut W, response: &RelayResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(response)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
