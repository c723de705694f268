use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Signature verification failed: {0}")]
    AuthenticationFailure(String),

    #[error("Failed to parse webhook envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Weather provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Failed to deliver reply: {0}")]
    DeliveryFailure(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl BotError {
    /// HTTP status reported to the webhook caller for this error.
    ///
    /// Provider and delivery failures never reach the caller as errors; they map
    /// to 200 because the event itself was accepted.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            BotError::AuthenticationFailure(_) | BotError::MalformedEnvelope(_) => 400,
            BotError::ProviderUnavailable(_) | BotError::DeliveryFailure(_) => 200,
            BotError::ConfigError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::MalformedEnvelope(error.to_string())
    }
}

impl From<anyhow::Error> for BotError {
    fn from(error: anyhow::Error) -> Self {
        BotError::ProviderUnavailable(format!("{error:#}"))
    }
}
