//! Webhook dispatcher: verify, parse, then route and answer each event.
//!
//! Events in one envelope are handled sequentially and independently. A
//! weather lookup that fails becomes a fallback sentence, and a reply that
//! fails to send is logged; neither stops the remaining events or changes the
//! status returned to LINE. A handler that panics is contained to its event.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, error, info, warn};

use super::{parsing, signature};
use crate::bot::{compose, route};
use crate::clients::{ReplySender, WeatherSource};
use crate::core::models::{
    DispatchReport, InboundRequest, Intent, MessageEvent, MessageKind, WebhookEvent,
};
use crate::errors::BotError;

pub struct Dispatcher<W, R> {
    channel_secret: String,
    weather: W,
    sender: R,
}

/// What happened to a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventOutcome {
    Replied,
    Failed,
    Skipped,
}

impl<W, R> Dispatcher<W, R>
where
    W: WeatherSource,
    R: ReplySender,
{
    pub fn new(channel_secret: impl Into<String>, weather: W, sender: R) -> Self {
        Self {
            channel_secret: channel_secret.into(),
            weather,
            sender,
        }
    }

    /// Runs one webhook call to completion.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::AuthenticationFailure`] when the signature is missing
    /// or wrong (no reply is attempted), and [`BotError::MalformedEnvelope`] when
    /// the body is not a webhook envelope. Per-event failures are absorbed into
    /// the returned report.
    pub async fn dispatch(&self, request: &InboundRequest) -> Result<DispatchReport, BotError> {
        let Some(sig) = request.signature.as_deref() else {
            return Err(BotError::AuthenticationFailure(
                "missing X-Line-Signature header".to_string(),
            ));
        };

        if !signature::verify(&request.body, sig, &self.channel_secret) {
            return Err(BotError::AuthenticationFailure(
                "invalid X-Line-Signature".to_string(),
            ));
        }

        let envelope = parsing::parse_envelope(&request.body)?;
        info!(
            destination = envelope.destination.as_deref().unwrap_or(""),
            events = envelope.events.len(),
            "Webhook verified"
        );

        let mut report = DispatchReport {
            events: envelope.events.len(),
            ..DispatchReport::default()
        };

        for event in &envelope.events {
            let outcome = match event {
                WebhookEvent::Message(message) => {
                    match AssertUnwindSafe(self.handle_message(message))
                        .catch_unwind()
                        .await
                    {
                        Ok(outcome) => outcome,
                        Err(_) => {
                            error!(
                                reply_token = message.reply_token.as_deref().unwrap_or(""),
                                "Event handler panicked"
                            );
                            EventOutcome::Failed
                        }
                    }
                }
                WebhookEvent::Other => {
                    debug!("Ignoring non-message event");
                    EventOutcome::Skipped
                }
            };

            match outcome {
                EventOutcome::Replied => report.replied += 1,
                EventOutcome::Failed => report.failed += 1,
                EventOutcome::Skipped => report.skipped += 1,
            }
        }

        info!(
            replied = report.replied,
            failed = report.failed,
            skipped = report.skipped,
            "Webhook processed"
        );
        Ok(report)
    }

    async fn handle_message(&self, event: &MessageEvent) -> EventOutcome {
        let Some(reply_token) = event.reply_token.as_deref() else {
            debug!("Ignoring message event without a reply token");
            return EventOutcome::Skipped;
        };

        let MessageKind::Text { text, .. } = &event.message else {
            debug!(reply_token = %reply_token, "Ignoring non-text message");
            return EventOutcome::Skipped;
        };

        let intent = route(text);
        let weather = match intent {
            Intent::Weather => Some(self.weather.fetch_tokyo_weather().await),
            Intent::Echo => None,
        };
        let reply = compose(intent, text, weather.as_ref());

        match self.sender.reply(reply_token, &reply).await {
            Ok(()) => EventOutcome::Replied,
            Err(e @ BotError::DeliveryFailure(_)) => {
                warn!(reply_token = %reply_token, ?intent, "{}", e);
                EventOutcome::Failed
            }
            Err(e) => {
                error!(reply_token = %reply_token, ?intent, "Unexpected reply error: {}", e);
                EventOutcome::Failed
            }
        }
    }
}
