//! Session management for multi-turn conversations.
//!
//! A session represents an ongoing conversation with one user, holding
//! every turn exchanged so far in chronological order.

use tracing::{debug, error};
use uuid::Uuid;

use chatrelay_core::{CompletionProvider, Message, Reply};

/// A conversation session with full message history.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: Uuid,
    user_id: String,
    transcript: Vec<Message>,
}

impl ConversationSession {
    /// Create a new empty conversation session for `user_id`.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: user_id.into(),
            transcript: Vec::new(),
        }
    }

    /// Append `turns`, then ask the provider for the next turn using the
    /// whole transcript as context.
    ///
    /// The reply is recorded only on success. On failure the appended input
    /// stays in the transcript and the error is returned as
    /// [`Reply::Failure`].
    pub async fn ask<P, I>(&mut self, provider: &P, model: &str, turns: I) -> Reply
    where
        P: CompletionProvider + ?Sized,
        I: IntoIterator<Item = Message>,
    {
        self.append(turns);

        match provider.complete(model, &self.transcript).await {
            Ok(reply) => {
                let message = Message::new(reply.role(), reply.content());
                self.transcript.push(message.clone());
                debug!(
                    "Session {} now holds {} turns",
                    self.id,
                    self.transcript.len()
                );
                Reply::Message(message)
            }
            Err(err) => {
                error!("[{}] {err}", self.user_id);
                Reply::from(err)
            }
        }
    }

    /// Append turns without calling the provider.
    pub fn append<I>(&mut self, turns: I)
    where
        I: IntoIterator<Item = Message>,
    {
        self.transcript.extend(turns);
    }

    /// Drop every turn. The session is not re-seeded.
    pub fn reset(&mut self) {
        self.transcript.clear();
        debug!("Session {} reset", self.id);
    }

    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.transcript.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedProvider;
    use chatrelay_core::{ProviderError, ProviderErrorKind, Role, prompt};

    #[tokio::test]
    async fn successful_asks_record_input_and_reply() {
        let provider = ScriptedProvider::new([
            Ok(Message::assistant("first")),
            Ok(Message::assistant("second")),
            Ok(Message::assistant("third")),
        ]);
        let mut session = ConversationSession::new("U1");

        let submitted = [
            prompt::default_seed(),
            vec![Message::user("one")],
            vec![Message::user("two"), Message::user("three")],
        ];
        let mut expected = 0;
        for turns in submitted {
            expected += turns.len() + 1;
            let reply = session.ask(&provider, "gpt-3.5-turbo", turns).await;
            assert!(reply.is_success());
            assert_eq!(session.len(), expected);
        }

        // Each call saw the full transcript, not just the new turns.
        assert_eq!(provider.transcript_sizes(), vec![3, 5, 8]);
        assert_eq!(session.transcript()[3].content(), "first");
        assert_eq!(session.transcript()[3].role(), Role::Assistant);
        assert_eq!(session.transcript()[8].content(), "third");
    }

    #[tokio::test]
    async fn failed_ask_keeps_input_but_records_no_reply() {
        let provider = ScriptedProvider::new([
            Ok(Message::assistant("hi")),
            Err(ProviderError::new(
                ProviderErrorKind::ServiceUnavailable,
                "overloaded",
            )),
        ]);
        let mut session = ConversationSession::new("U1");
        session.ask(&provider, "m", [Message::user("hello")]).await;
        let before = session.len();

        let reply = session.ask(&provider, "m", [Message::user("again")]).await;

        assert_eq!(
            reply,
            Reply::Failure {
                kind: ProviderErrorKind::ServiceUnavailable,
                description: "Service Unavailable: overloaded".to_string(),
            }
        );
        assert_eq!(session.len(), before + 1);
        assert_eq!(
            session.transcript().last(),
            Some(&Message::user("again")),
            "the user's turn stays for context"
        );
    }

    #[tokio::test]
    async fn reply_name_is_dropped() {
        let provider =
            ScriptedProvider::new([Ok(Message::assistant("named").with_name("bot"))]);
        let mut session = ConversationSession::new("U1");

        let reply = session.ask(&provider, "m", [Message::user("x")]).await;

        assert_eq!(reply.message().and_then(Message::name), None);
        assert_eq!(session.transcript()[1].name(), None);
    }

    #[test]
    fn reset_empties_transcript_without_reseeding() {
        let mut session = ConversationSession::new("U1");
        session.append(prompt::default_seed());
        session.append([Message::user("hello")]);

        session.reset();

        assert!(session.is_empty());
        assert!(session.transcript().is_empty());

        // Resetting an already empty session is fine too.
        session.reset();
        assert_eq!(session.len(), 0);
    }
}
