//! User mention tokens (`<@U0123ABC>`) inside message text.

use std::sync::OnceLock;

use regex::Regex;

static MENTION_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn mention_pattern() -> &'static Regex {
    MENTION_PATTERN.get_or_init(|| {
        Regex::new(r"<@[A-Z0-9]*>").expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Remove every mention token from `text`, leaving the surrounding
/// whitespace untouched.
#[must_use]
pub fn strip_mentions(text: &str) -> String {
    mention_pattern().replace_all(text, "").into_owned()
}

/// Whether `text` addresses the user `user_id`.
#[must_use]
pub fn is_addressed_to(text: &str, user_id: &str) -> bool {
    !user_id.is_empty() && text.contains(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_mention() {
        assert_eq!(strip_mentions("hello <@BOT>"), "hello ");
    }

    #[test]
    fn strips_every_mention() {
        assert_eq!(
            strip_mentions("<@U0LAN0Z89> ask <@U061F7AUR> about SQL"),
            " ask  about SQL"
        );
    }

    #[test]
    fn leaves_other_markup_alone() {
        assert_eq!(
            strip_mentions("see <#C024BE7LR> and <@lower>"),
            "see <#C024BE7LR> and <@lower>"
        );
        assert_eq!(strip_mentions("<@>"), "");
    }

    #[test]
    fn addressing_checks_the_bot_id() {
        assert!(is_addressed_to("hey <@U0BOT>", "U0BOT"));
        assert!(!is_addressed_to("hey <@U0OTHER>", "U0BOT"));
        assert!(!is_addressed_to("hey", ""));
    }
}
