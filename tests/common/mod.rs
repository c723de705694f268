#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tenki_bot::BotError;
use tenki_bot::api::signature::compute_signature;
use tenki_bot::clients::{ReplySender, WeatherSource};
use tenki_bot::core::models::{ReplyText, WeatherOutcome, WeatherSummary};

pub const SECRET: &str = "test_channel_secret";

/// Weather source returning a canned outcome and counting calls.
pub struct FakeWeather {
    outcome: WeatherOutcome,
    pub calls: AtomicUsize,
}

impl FakeWeather {
    pub fn available(description: &str, temperature_c: f64, feels_like_c: f64) -> Self {
        Self {
            outcome: WeatherOutcome::Available(WeatherSummary {
                description: description.to_string(),
                temperature_c,
                feels_like_c,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            outcome: WeatherOutcome::Unavailable,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn fetch_tokyo_weather(&self) -> WeatherOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Reply sender that records every reply and fails or panics for chosen tokens.
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail_tokens: Vec<String>,
    pub panic_tokens: Vec<String>,
}

impl RecordingSender {
    pub fn failing_for(token: &str) -> Self {
        Self {
            fail_tokens: vec![token.to_string()],
            ..Self::default()
        }
    }

    pub fn panicking_for(token: &str) -> Self {
        Self {
            panic_tokens: vec![token.to_string()],
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySender for RecordingSender {
    async fn reply(&self, reply_token: &str, text: &ReplyText) -> Result<(), BotError> {
        if self.panic_tokens.iter().any(|t| t == reply_token) {
            panic!("handler blew up for {reply_token}");
        }
        if self.fail_tokens.iter().any(|t| t == reply_token) {
            return Err(BotError::DeliveryFailure(format!("refused {reply_token}")));
        }
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.as_str().to_string()));
        Ok(())
    }
}

pub fn text_event(reply_token: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "mode": "active",
        "timestamp": 1_700_000_000_000_u64,
        "source": { "type": "user", "userId": "U0123" },
        "webhookEventId": "01H000000000000000000000",
        "deliveryContext": { "isRedelivery": false },
        "replyToken": reply_token,
        "message": { "type": "text", "id": "4680000000", "quoteToken": "q", "text": text }
    })
}

pub fn envelope(events: Vec<Value>) -> String {
    json!({ "destination": "Uxxxxxxxx", "events": events }).to_string()
}

pub fn sign(body: &str) -> String {
    compute_signature(body.as_bytes(), SECRET)
}

/// API Gateway HTTP API (payload v2) event.
pub fn gateway_event(method: &str, path: &str, headers: Value, body: Option<&str>) -> Value {
    let mut event = json!({
        "version": "2.0",
        "rawPath": path,
        "headers": headers,
        "requestContext": { "http": { "method": method, "path": path } },
        "isBase64Encoded": false
    });
    if let Some(body) = body {
        event["body"] = Value::String(body.to_string());
    }
    event
}
