/// Chat commands understood in place of a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Reset,
    Help,
}

impl Command {
    /// Parse mention text with the mention tokens already removed.
    #[must_use]
    pub fn parse_from_text(text: &str) -> Option<Self> {
        let text = text.trim().to_lowercase();
        let text = text.strip_prefix('/').unwrap_or(&text);

        match text {
            "reset" => Some(Self::Reset),
            "help" => Some(Self::Help),
            _ => None,
        }
    }

    #[must_use]
    pub const fn help_text() -> &'static str {
        "Mention me with a question and I will answer in the thread. \
         I remember our earlier messages, so follow-ups work.\n\
         • `reset` - forget our conversation and start over\n\
         • `help` - show this message"
    }

    #[must_use]
    pub const fn reset_text() -> &'static str {
        "Conversation history cleared. Your next message starts a new conversation."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse_from_text(" reset "), Some(Command::Reset));
        assert_eq!(Command::parse_from_text("/RESET"), Some(Command::Reset));
        assert_eq!(Command::parse_from_text("help"), Some(Command::Help));
        assert_eq!(Command::parse_from_text("please reset the server"), None);
        assert_eq!(Command::parse_from_text(""), None);
    }
}
