//! Events API payloads.

use serde::Deserialize;

/// Outer request body delivered to the events endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    /// Sent once when the endpoint URL is configured; echo the challenge.
    UrlVerification { challenge: String },
    EventCallback {
        event: Event,
        #[serde(default)]
        event_id: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl EventEnvelope {
    pub fn from_slice(body: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    AppMention(MentionEvent),
    #[serde(other)]
    Other,
}

/// A message that mentions the bot.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MentionEvent {
    pub channel: String,
    pub user: String,
    pub text: String,
    pub ts: String,
    #[serde(default)]
    pub thread_ts: Option<String>,
}

impl MentionEvent {
    /// Timestamp of the thread a reply belongs in.
    #[must_use]
    pub fn reply_thread(&self) -> &str {
        self.thread_ts.as_deref().unwrap_or(&self.ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn parses_app_mention_callback() {
        let body = br#"{
            "token": "ZZZ",
            "team_id": "T061EG9R6",
            "type": "event_callback",
            "event_id": "Ev0PV52K21",
            "event": {
                "type": "app_mention",
                "user": "U061F7AUR",
                "text": "<@U0LAN0Z89> is it everything a river should be?",
                "ts": "1515449522.000016",
                "channel": "C0LAN2Q65",
                "event_ts": "1515449522000016"
            }
        }"#;

        let envelope = EventEnvelope::from_slice(body).expect("Failed to parse envelope");
        let EventEnvelope::EventCallback { event, event_id } = envelope else {
            panic!("expected an event callback");
        };
        assert_eq!(event_id.as_deref(), Some("Ev0PV52K21"));

        let Event::AppMention(mention) = event else {
            panic!("expected an app mention");
        };
        assert_eq!(mention.user, "U061F7AUR");
        assert_eq!(mention.channel, "C0LAN2Q65");
        assert_eq!(mention.reply_thread(), "1515449522.000016");
    }

    #[test]
    fn reply_stays_in_existing_thread() {
        let mention = MentionEvent {
            channel: "C1".to_string(),
            user: "U1".to_string(),
            text: "hi".to_string(),
            ts: "2.0".to_string(),
            thread_ts: Some("1.0".to_string()),
        };
        assert_eq!(mention.reply_thread(), "1.0");
    }

    #[test]
    fn parses_url_verification() {
        let body = br#"{"token":"x","challenge":"3eZbrw1aB","type":"url_verification"}"#;
        let envelope = EventEnvelope::from_slice(body).ok();
        assert_eq!(
            envelope,
            Some(EventEnvelope::UrlVerification {
                challenge: "3eZbrw1aB".to_string()
            })
        );
    }

    #[test]
    fn unknown_types_are_tolerated() {
        let envelope = EventEnvelope::from_slice(br#"{"type":"app_rate_limited"}"#).ok();
        assert_eq!(envelope, Some(EventEnvelope::Unsupported));

        let body = br#"{"type":"event_callback","event":{"type":"reaction_added","user":"U1"}}"#;
        let envelope = EventEnvelope::from_slice(body).ok();
        assert_eq!(
            envelope,
            Some(EventEnvelope::EventCallback {
                event: Event::Other,
                event_id: None
            })
        );
    }

    #[test]
    fn garbage_is_a_payload_error() {
        assert!(matches!(
            EventEnvelope::from_slice(b"not json"),
            Err(crate::Error::Payload(_))
        ));
    }
}
