use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Slack API error: {0}")]
    SlackApi(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request signature: {0}")]
    InvalidSignature(&'static str),

    #[error("Request timestamp is outside the accepted window")]
    StaleRequest,

    #[error("Malformed event payload: {0}")]
    Payload(#[from] serde_json::Error),
}
