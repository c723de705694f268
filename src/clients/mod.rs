//! Outbound collaborators: the weather provider and the LINE reply API.
//!
//! The dispatcher only sees the [`WeatherSource`] and [`ReplySender`] traits so
//! that tests can swap in fakes.

pub mod line_client;
pub mod weather_client;

use async_trait::async_trait;

use crate::core::models::{ReplyText, WeatherOutcome};
use crate::errors::BotError;

pub use line_client::LineClient;
pub use weather_client::WeatherClient;

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current Tokyo weather. Provider failures come back as
    /// [`WeatherOutcome::Unavailable`], never as an error.
    async fn fetch_tokyo_weather(&self) -> WeatherOutcome;
}

#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Sends exactly one text reply for `reply_token`.
    async fn reply(&self, reply_token: &str, text: &ReplyText) -> Result<(), BotError>;
}

#[async_trait]
impl<T: WeatherSource + ?Sized> WeatherSource for &T {
    async fn fetch_tokyo_weather(&self) -> WeatherOutcome {
        (**self).fetch_tokyo_weather().await
    }
}

#[async_trait]
impl<T: ReplySender + ?Sized> ReplySender for &T {
    async fn reply(&self, reply_token: &str, text: &ReplyText) -> Result<(), BotError> {
        (**self).reply(reply_token, text).await
    }
}
