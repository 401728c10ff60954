use std::sync::Arc;

use chatrelay_conversation::SessionRegistry;
use chatrelay_core::{CompletionProvider, Reply};
use tracing::{debug, info};

use crate::event::{Event, EventEnvelope, MentionEvent};
use crate::mention::{is_addressed_to, strip_mentions};
use crate::{Command, Result, SlackClient, signature};

/// What the handler did with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Endpoint verification; the challenge must be echoed back.
    Challenge(String),
    /// The user's text went to the provider and the reply was posted.
    Replied(Reply),
    /// A chat command was answered without calling the provider.
    Command(Command),
    /// Nothing for this bot.
    Ignored,
}

/// Turns Slack events into conversation turns and posts the answers.
pub struct EventHandler<P = Arc<dyn CompletionProvider>>
where
    P: Send + Sync,
{
    registry: Arc<SessionRegistry<P>>,
    client: SlackClient,
    bot_user_id: String,
    signing_secret: String,
}

impl<P> EventHandler<P>
where
    P: CompletionProvider + Send + Sync,
{
    pub fn new(
        registry: Arc<SessionRegistry<P>>,
        client: SlackClient,
        bot_user_id: String,
        signing_secret: String,
    ) -> Self {
        Self {
            registry,
            client,
            bot_user_id,
            signing_secret,
        }
    }

    /// Build a handler, asking Slack for the bot's user id.
    pub async fn connect(
        registry: Arc<SessionRegistry<P>>,
        client: SlackClient,
        signing_secret: String,
    ) -> Result<Self> {
        let bot_user_id = client.auth_test().await?;
        Ok(Self::new(registry, client, bot_user_id, signing_secret))
    }

    #[must_use]
    pub fn bot_user_id(&self) -> &str {
        &self.bot_user_id
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<SessionRegistry<P>> {
        &self.registry
    }

    /// Verify and handle one raw Events API request.
    pub async fn handle_request(
        &self,
        timestamp: &str,
        signature: &str,
        body: &[u8],
    ) -> Result<HandlerOutcome> {
        let now = chrono::Utc::now().timestamp();
        signature::verify(&self.signing_secret, timestamp, body, signature, now)?;

        let envelope = EventEnvelope::from_slice(body)?;
        self.handle_envelope(envelope).await
    }

    pub async fn handle_envelope(&self, envelope: EventEnvelope) -> Result<HandlerOutcome> {
        match envelope {
            EventEnvelope::UrlVerification { challenge } => {
                info!("Answering URL verification challenge");
                Ok(HandlerOutcome::Challenge(challenge))
            }
            EventEnvelope::EventCallback {
                event: Event::AppMention(mention),
                ..
            } => self.handle_mention(&mention).await,
            EventEnvelope::EventCallback { .. } | EventEnvelope::Unsupported => {
                debug!("Ignoring unsupported event");
                Ok(HandlerOutcome::Ignored)
            }
        }
    }

    /// Answer a mention in its thread.
    pub async fn handle_mention(&self, event: &MentionEvent) -> Result<HandlerOutcome> {
        if !is_addressed_to(&event.text, &self.bot_user_id) {
            debug!("[{}] Mention not addressed to this bot", event.user);
            return Ok(HandlerOutcome::Ignored);
        }

        let prompt = strip_mentions(&event.text);

        if let Some(command) = Command::parse_from_text(&prompt) {
            return self.handle_command(event, command).await;
        }

        info!("[{}] Message: {prompt}", event.user);

        let reply = self.registry.ask(&event.user, &prompt).await;

        info!(
            "[{}] Response ({}): {} chars",
            event.user,
            if reply.is_success() { "ok" } else { "failed" },
            reply.text().len()
        );

        self.client
            .post_message(&event.channel, Some(event.reply_thread()), reply.text())
            .await?;

        Ok(HandlerOutcome::Replied(reply))
    }

    async fn handle_command(
        &self,
        event: &MentionEvent,
        command: Command,
    ) -> Result<HandlerOutcome> {
        let text = match command {
            Command::Reset => {
                info!("[{}] Command: reset", event.user);
                self.registry.evict(&event.user).await;
                Command::reset_text()
            }
            Command::Help => {
                info!("[{}] Command: help", event.user);
                Command::help_text()
            }
        };

        self.client
            .post_message(&event.channel, Some(event.reply_thread()), text)
            .await?;

        Ok(HandlerOutcome::Command(command))
    }
}
