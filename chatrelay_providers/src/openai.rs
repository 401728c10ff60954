use std::time::Duration;

use async_trait::async_trait;
use chatrelay_core::{CompletionProvider, Message, ProviderError, ProviderErrorKind, Role};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// `content` is `null` for refusals and tool calls.
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    role: Role,
    #[serde(default)]
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    organization: Option<String>,
    base_url: String,
    default_model: String,
    timeout: Option<Duration>,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating OpenAiProvider");
        Self {
            client: Client::new(),
            api_key,
            organization: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization.filter(|o| !o.is_empty());
        self
    }

    #[must_use]
    pub fn with_default_model(mut self, model: String) -> Self {
        self.default_model = model;
        self
    }

    /// Bound each request. Without this the client waits indefinitely.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn try_send(&self, request: &serde_json::Value) -> Result<Message, ProviderError> {
        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request);

        if let Some(organization) = &self.organization {
            builder = builder.header("OpenAI-Organization", organization);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(classify_transport)?;
        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        parse_completion(&body)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        model: &str,
        transcript: &[Message],
    ) -> Result<Message, ProviderError> {
        let request = json!({
            "model": model,
            "messages": transcript.iter().map(Message::to_wire).collect::<Vec<_>>(),
        });

        info!(
            "Sending request to OpenAI API: model={}, turns={}",
            model,
            transcript.len()
        );

        let reply = self.try_send(&request).await?;

        info!("Received response from OpenAI API");
        debug!("Reply role={}, {} chars", reply.role(), reply.content().len());
        Ok(reply)
    }

    fn get_default_model(&self) -> &str {
        &self.default_model
    }
}

fn classify_transport(err: reqwest::Error) -> ProviderError {
    let kind = if err.is_timeout() {
        ProviderErrorKind::Timeout
    } else if err.is_connect() || err.is_request() || err.is_body() {
        ProviderErrorKind::Connection
    } else {
        ProviderErrorKind::Other
    };
    ProviderError::new(kind, err.to_string())
}

fn classify_status(status: StatusCode, body: &str) -> ProviderError {
    let kind = match status.as_u16() {
        401 | 403 => ProviderErrorKind::Authentication,
        400 | 404 | 409 | 422 => ProviderErrorKind::InvalidRequest,
        429 => ProviderErrorKind::RateLimit,
        503 => ProviderErrorKind::ServiceUnavailable,
        504 => ProviderErrorKind::Timeout,
        _ => ProviderErrorKind::Api,
    };
    ProviderError::new(kind, error_message(status, body))
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(ToString::to_string));

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status.to_string(),
    }
}

fn parse_completion(body: &str) -> Result<Message, ProviderError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::other(format!("Invalid response format: {e}")))?;

    if let Some(message) = value["error"]["message"].as_str() {
        return Err(ProviderError::new(ProviderErrorKind::Api, message));
    }

    let response: CompletionResponse = serde_json::from_value(value)
        .map_err(|e| ProviderError::other(format!("Invalid response format: {e}")))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::other("Invalid response format: missing choices"))?;

    match choice.message.content {
        Some(content) => Ok(Message::new(choice.message.role, content)),
        None => Err(ProviderError::new(
            ProviderErrorKind::Api,
            format!(
                "Completion has no text content (finish_reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ),
        )),
    }
}
