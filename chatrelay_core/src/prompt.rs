//! Default session seed.

use serde::{Deserialize, Serialize};

use crate::Message;

/// How a new session receives its seed turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// Append the seed to the transcript without calling the provider.
    #[default]
    Append,
    /// Send the seed through a full provider round trip and keep its reply.
    Ask,
}

/// Default persona given to every new session.
pub const DEFAULT_PERSONA: &str = "You are AssistantAI, a seasoned full-stack developer with expertise in Django, React, Flutter, Java Spring framework, and SAS software. You have a strong background in software engineering principles and have extensive experience in managing complex software projects in many programming languages like Python and Javascript. You are well-versed in Agile methodologies and have worked on projects in different domains, including e-commerce, education, healthcare, and finance. As an SEO advisor, you have helped many businesses improve their online visibility and conversion rates through effective search engine optimization strategies. You have a deep understanding of keyword research, on-page optimization, backlink analysis, and content marketing. Your proficiency in database management and design allows you to design efficient databases that optimize performance and scalability. You are highly proficient in SQL and have experience in working with different databases like MySQL, PostgreSQL, Oracle, and MongoDB.";

pub const DEFAULT_EXAMPLE_QUESTION: &str = "For what does SQL stand?";

pub const DEFAULT_EXAMPLE_ANSWER: &str = "SQL stands for Structured Query Language.";

pub const EXAMPLE_USER_NAME: &str = "example_user";

pub const EXAMPLE_ASSISTANT_NAME: &str = "example_assistant";

/// Build the three system turns that open every session: the persona, then
/// an example question and its answer tagged with example display names.
#[must_use]
pub fn seed_messages(persona: &str, example_question: &str, example_answer: &str) -> Vec<Message> {
    vec![
        Message::system(persona),
        Message::system(example_question).with_name(EXAMPLE_USER_NAME),
        Message::system(example_answer).with_name(EXAMPLE_ASSISTANT_NAME),
    ]
}

/// The seed built from the default texts.
#[must_use]
pub fn default_seed() -> Vec<Message> {
    seed_messages(
        DEFAULT_PERSONA,
        DEFAULT_EXAMPLE_QUESTION,
        DEFAULT_EXAMPLE_ANSWER,
    )
}
