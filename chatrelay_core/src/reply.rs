use crate::{Message, ProviderError, ProviderErrorKind};

/// Outcome of asking a session for its next turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The provider answered; the turn has been recorded in the transcript.
    Message(Message),
    /// The provider call failed; nothing was recorded for the reply.
    Failure {
        kind: ProviderErrorKind,
        description: String,
    },
}

impl Reply {
    /// Text to show the user, regardless of outcome.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Message(message) => message.content(),
            Self::Failure { description, .. } => description,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Message(_))
    }

    #[must_use]
    pub const fn message(&self) -> Option<&Message> {
        match self {
            Self::Message(message) => Some(message),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub const fn failure_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::Message(_) => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<ProviderError> for Reply {
    fn from(err: ProviderError) -> Self {
        Self::Failure {
            kind: err.kind,
            description: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_of_either_variant() {
        let ok = Reply::Message(Message::assistant("Hi there"));
        assert_eq!(ok.text(), "Hi there");
        assert!(ok.is_success());
        assert_eq!(ok.failure_kind(), None);

        let failed: Reply = ProviderError::new(ProviderErrorKind::RateLimit, "slow down").into();
        assert_eq!(
            failed.text(),
            "OpenAI API request exceeded rate limit: slow down"
        );
        assert_eq!(failed.failure_kind(), Some(ProviderErrorKind::RateLimit));
        assert!(failed.message().is_none());
    }
}
