use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// Minimal Slack Web API client.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    token: String,
    api_base: String,
}

impl SlackClient {
    pub fn new(token: String) -> Self {
        Self {
            client: Client::new(),
            token,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Call a Web API method. Slack reports failures as `{"ok": false}` with
    /// a 200 status, so both layers are checked.
    async fn call(&self, method: &str, body: &Value) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}/{method}", self.api_base))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        if response["ok"].as_bool() != Some(true) {
            let reason = response["error"].as_str().unwrap_or("unknown_error");
            return Err(Error::SlackApi(format!("{method}: {reason}")));
        }

        Ok(response)
    }

    /// Resolve the bot's own user id (`auth.test`).
    pub async fn auth_test(&self) -> Result<String> {
        let response = self.call("auth.test", &json!({})).await?;
        let user_id = response["user_id"]
            .as_str()
            .ok_or_else(|| Error::SlackApi("auth.test: missing user_id".to_string()))?
            .to_string();

        info!(
            "Connected to Slack as {} (id: {user_id})",
            response["user"].as_str().unwrap_or("unknown")
        );
        Ok(user_id)
    }

    /// Post `text` to `channel`, inside `thread_ts` when given.
    pub async fn post_message(
        &self,
        channel: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<()> {
        let mut body = json!({
            "channel": channel,
            "text": text,
        });
        if let Some(ts) = thread_ts {
            body["thread_ts"] = json!(ts);
        }

        self.call("chat.postMessage", &body).await?;
        debug!("Posted {} chars to {channel}", text.len());
        Ok(())
    }
}
