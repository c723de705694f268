//! LINE Messaging API reply client.
//!
//! Only `POST /v2/bot/message/reply` is used. Reply tokens are single-use, so a
//! failed send is reported and never retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::ReplySender;
use crate::core::config::AppConfig;
use crate::core::models::ReplyText;
use crate::errors::BotError;

const REPLY_PATH: &str = "v2/bot/message/reply";
const REPLY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    message_type: &'static str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: [TextMessage<'a>; 1],
}

/// Builds the JSON body for a single text reply.
#[must_use]
pub fn build_reply_payload(reply_token: &str, text: &ReplyText) -> serde_json::Value {
    serde_json::to_value(ReplyRequest {
        reply_token,
        messages: [TextMessage {
            message_type: "text",
            text: text.as_str(),
        }],
    })
    .unwrap_or_default()
}

pub struct LineClient {
    http: Client,
    endpoint: Url,
    access_token: String,
}

impl LineClient {
    /// # Errors
    ///
    /// Returns [`BotError::ConfigError`] if the HTTP client cannot be built or the
    /// base URL cannot be joined with the reply path.
    pub fn new(config: &AppConfig) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(REPLY_TIMEOUT)
            .build()
            .map_err(|e| BotError::ConfigError(format!("LINE HTTP client: {e}")))?;
        let endpoint = config
            .line_api_base_url
            .join(REPLY_PATH)
            .map_err(|e| BotError::ConfigError(format!("LINE_API_BASE_URL: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            access_token: config.line_channel_access_token.clone(),
        })
    }
}

#[async_trait]
impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, text: &ReplyText) -> Result<(), BotError> {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.access_token)
            .json(&build_reply_payload(reply_token, text))
            .send()
            .await
            .map_err(|e| BotError::DeliveryFailure(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            debug!(status = %status, body = %body_text, "LINE reply rejected");
            return Err(BotError::DeliveryFailure(format!(
                "LINE reply API returned {status}"
            )));
        }

        info!(reply_token = %reply_token, "Reply delivered");
        Ok(())
    }
}
