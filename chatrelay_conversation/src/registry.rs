//! Lazily created sessions, one per user.

use std::collections::HashMap;
use std::sync::Arc;

use chatrelay_core::{CompletionProvider, Message, Reply, SeedMode, prompt};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::session::ConversationSession;

/// A session shared between the registry and whoever is handling a turn.
pub type SharedSession = Arc<Mutex<ConversationSession>>;

/// Registry size at which growth is reported again.
const GROWTH_WARNING_STEP: usize = 1000;

/// Configuration shared by every session of a registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Model to use for completions
    pub model: String,
    /// Turns given to every new session
    pub seed: Vec<Message>,
    pub seed_mode: SeedMode,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            seed: prompt::default_seed(),
            seed_mode: SeedMode::default(),
        }
    }
}

impl RegistryConfig {
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Vec<Message>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn with_seed_mode(mut self, seed_mode: SeedMode) -> Self {
        self.seed_mode = seed_mode;
        self
    }
}

/// Maps user identifiers to their conversation sessions.
///
/// Sessions live until [`SessionRegistry::evict`] removes them. Each one is
/// guarded by its own lock, held for a whole turn, so turns of one user are
/// applied in order while different users proceed concurrently.
pub struct SessionRegistry<P = Arc<dyn CompletionProvider>>
where
    P: Send + Sync,
{
    provider: P,
    config: RegistryConfig,
    sessions: Mutex<HashMap<String, SharedSession>>,
}

impl<P> SessionRegistry<P>
where
    P: CompletionProvider + Send + Sync,
{
    pub fn new(provider: P, config: RegistryConfig) -> Self {
        info!(
            "Creating session registry: model={}, seed_turns={}, seed_mode={:?}",
            config.model,
            config.seed.len(),
            config.seed_mode
        );
        Self {
            provider,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Return the session of `user_id`, creating and seeding it on first
    /// contact.
    ///
    /// A new session is locked before it becomes visible, so concurrent
    /// callers for the same user wait until seeding has finished.
    pub async fn get_or_create(&self, user_id: &str) -> SharedSession {
        let (session, mut guard) = {
            let mut sessions = self.sessions.lock().await;
            if let Some(existing) = sessions.get(user_id) {
                return Arc::clone(existing);
            }

            let session = Arc::new(Mutex::new(ConversationSession::new(user_id)));
            let guard = Arc::clone(&session).lock_owned().await;
            sessions.insert(user_id.to_string(), Arc::clone(&session));

            let count = sessions.len();
            if count % GROWTH_WARNING_STEP == 0 {
                warn!("Session registry holds {count} sessions; nothing is evicted automatically");
            }
            (session, guard)
        };

        info!("Created session {} for user {user_id}", guard.id());
        self.seed(&mut guard).await;
        drop(guard);

        session
    }

    /// Send one user turn and return the outcome.
    pub async fn ask(&self, user_id: &str, text: &str) -> Reply {
        let session = self.get_or_create(user_id).await;
        let mut session = session.lock().await;
        session
            .ask(&self.provider, &self.config.model, [Message::user(text)])
            .await
    }

    /// Look up a session without creating it.
    pub async fn get(&self, user_id: &str) -> Option<SharedSession> {
        self.sessions.lock().await.get(user_id).cloned()
    }

    /// Empty the transcript of `user_id`. Returns `false` for unknown users.
    pub async fn reset(&self, user_id: &str) -> bool {
        let Some(session) = self.get(user_id).await else {
            return false;
        };
        session.lock().await.reset();
        info!("Reset session for user {user_id}");
        true
    }

    /// Forget `user_id`; their next message starts a freshly seeded session.
    pub async fn evict(&self, user_id: &str) -> bool {
        let removed = self.sessions.lock().await.remove(user_id).is_some();
        if removed {
            info!("Evicted session for user {user_id}");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    async fn seed(&self, session: &mut ConversationSession) {
        let seed = self.config.seed.clone();
        match self.config.seed_mode {
            SeedMode::Append => {
                session.append(seed);
                debug!("Seeded session {} with {} turns", session.id(), session.len());
            }
            SeedMode::Ask => {
                let reply = session
                    .ask(&self.provider, &self.config.model, seed)
                    .await;
                match reply {
                    Reply::Message(_) => {
                        debug!("Seeded session {} through the provider", session.id());
                    }
                    Reply::Failure { description, .. } => {
                        warn!("Seeding session {} failed: {description}", session.id());
                    }
                }
            }
        }
    }
}
