use serde::Deserialize;

/// LINE rejects text messages longer than this many characters.
pub const MAX_REPLY_CHARS: usize = 5000;

/// A webhook call as it reached us: untouched body bytes plus the signature header.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub body: Vec<u8>,
    pub signature: Option<String>,
}

impl InboundRequest {
    #[must_use]
    pub fn new(body: impl Into<Vec<u8>>, signature: Option<String>) -> Self {
        Self {
            body: body.into(),
            signature,
        }
    }
}

/// Top-level webhook payload. `events` may legitimately be empty (LINE sends
/// an empty list when verifying the webhook URL from the console).
#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(default)]
    pub destination: Option<String>,
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    Message(MessageEvent),
    /// follow, unfollow, postback, join... acknowledged without a reply.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Absent when LINE does not allow a reply, e.g. `"mode": "standby"`.
    #[serde(default)]
    pub reply_token: Option<String>,
    pub message: MessageKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageKind {
    Text {
        #[serde(default)]
        id: Option<String>,
        text: String,
    },
    /// image, sticker, location... not handled.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Weather,
    Echo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    Available(WeatherSummary),
    Unavailable,
}

/// Text handed to the reply API. Never empty and never longer than
/// [`MAX_REPLY_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyText(String);

impl ReplyText {
    /// Wraps `text`, truncating on a char boundary. Returns `None` for empty input.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }
        Some(Self::truncated(text))
    }

    /// Caller guarantees `text` is non-empty (fixed templates).
    pub(crate) fn truncated(mut text: String) -> Self {
        debug_assert!(!text.is_empty());
        if let Some((idx, _)) = text.char_indices().nth(MAX_REPLY_CHARS) {
            text.truncate(idx);
        }
        Self(text)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl AsRef<str> for ReplyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReplyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request tally of what the dispatcher did with each event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub events: usize,
    pub replied: usize,
    pub failed: usize,
    pub skipped: usize,
}
