//! Multi-turn behavior of the registry against a scripted provider.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chatrelay_conversation::{RegistryConfig, SessionRegistry};
use chatrelay_core::{
    CompletionProvider, Message, ProviderError, ProviderErrorKind, Reply, Role, prompt,
};

/// Pops one scripted outcome per call and keeps a copy of every transcript.
#[derive(Default)]
struct RecordingProvider {
    outcomes: Mutex<VecDeque<Result<Message, ProviderError>>>,
    transcripts: Mutex<Vec<Vec<Message>>>,
}

impl RecordingProvider {
    fn push(&self, outcome: Result<Message, ProviderError>) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(outcome);
        }
    }

    fn transcripts(&self) -> Vec<Vec<Message>> {
        self.transcripts
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn complete(
        &self,
        _model: &str,
        transcript: &[Message],
    ) -> Result<Message, ProviderError> {
        if let Ok(mut transcripts) = self.transcripts.lock() {
            transcripts.push(transcript.to_vec());
        }
        self.outcomes
            .lock()
            .ok()
            .and_then(|mut o| o.pop_front())
            .unwrap_or_else(|| Err(ProviderError::other("no scripted outcome")))
    }

    fn get_default_model(&self) -> &'static str {
        "recording"
    }
}

async fn session_len<P: CompletionProvider>(registry: &SessionRegistry<P>, user: &str) -> usize {
    match registry.get(user).await {
        Some(session) => session.lock().await.len(),
        None => 0,
    }
}

#[tokio::test]
async fn first_contact_then_failure() {
    let provider = Arc::new(RecordingProvider::default());
    let registry = SessionRegistry::new(Arc::clone(&provider), RegistryConfig::default());

    provider.push(Ok(Message::assistant("Hi there")));
    let reply = registry.ask("U1", "hello ").await;

    assert_eq!(reply, Reply::Message(Message::assistant("Hi there")));
    assert_eq!(session_len(&registry, "U1").await, 5);

    // The provider saw the seed followed by the user's turn.
    let sent = provider.transcripts();
    assert_eq!(sent.len(), 1);
    assert_eq!(&sent[0][..3], prompt::default_seed().as_slice());
    assert_eq!(sent[0][3], Message::user("hello "));

    provider.push(Err(ProviderError::new(
        ProviderErrorKind::Authentication,
        "Incorrect API key provided",
    )));
    let reply = registry.ask("U1", "still there?").await;

    assert_eq!(reply.failure_kind(), Some(ProviderErrorKind::Authentication));
    assert!(reply.text().contains("Authentication Error"));
    assert!(reply.text().contains("Incorrect API key provided"));
    assert_eq!(session_len(&registry, "U1").await, 6);
}

#[tokio::test]
async fn every_failure_kind_is_returned_not_raised() {
    let kinds = [
        ProviderErrorKind::Api,
        ProviderErrorKind::Authentication,
        ProviderErrorKind::Connection,
        ProviderErrorKind::InvalidRequest,
        ProviderErrorKind::RateLimit,
        ProviderErrorKind::ServiceUnavailable,
        ProviderErrorKind::Timeout,
        ProviderErrorKind::Other,
    ];
    let provider = Arc::new(RecordingProvider::default());
    let registry = SessionRegistry::new(Arc::clone(&provider), RegistryConfig::default());

    for (i, kind) in kinds.into_iter().enumerate() {
        provider.push(Err(ProviderError::new(kind, "nope")));
        let reply = registry.ask("U1", "hello").await;

        assert_eq!(reply.failure_kind(), Some(kind));
        assert_eq!(reply.text(), format!("{}: nope", kind.prefix()));
        assert_eq!(session_len(&registry, "U1").await, 3 + i + 1);
    }
}

#[tokio::test]
async fn users_do_not_share_context() {
    let provider = Arc::new(RecordingProvider::default());
    let registry = SessionRegistry::new(Arc::clone(&provider), RegistryConfig::default());

    provider.push(Ok(Message::assistant("hello alice")));
    provider.push(Ok(Message::assistant("hello bob")));
    registry.ask("alice", "I am alice").await;
    registry.ask("bob", "I am bob").await;

    let sent = provider.transcripts();
    assert_eq!(sent[1].len(), 4);
    assert!(sent[1].iter().all(|m| m.content() != "I am alice"));
}

#[tokio::test]
async fn reset_session_continues_without_context() {
    let provider = Arc::new(RecordingProvider::default());
    let config = RegistryConfig::default().with_model("gpt-4o-mini".to_string());
    let registry = SessionRegistry::new(Arc::clone(&provider), config);

    provider.push(Ok(Message::assistant("one")));
    registry.ask("U1", "first").await;
    assert!(registry.reset("U1").await);

    provider.push(Ok(Message::assistant("two")));
    registry.ask("U1", "second").await;

    let sent = provider.transcripts();
    assert_eq!(sent[1], vec![Message::user("second")]);
    assert_eq!(sent[1][0].role(), Role::User);
    assert_eq!(session_len(&registry, "U1").await, 2);
}
