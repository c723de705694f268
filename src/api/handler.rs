//! Lambda handler - thin router in front of the webhook dispatcher.
//!
//! Routes:
//! - `GET /` liveness text
//! - `POST /webhook` signed LINE webhook

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use super::dispatcher::Dispatcher;
use super::{helpers, parsing};
use crate::clients::{LineClient, ReplySender, WeatherClient, WeatherSource};
use crate::core::config::AppConfig;
use crate::core::models::InboundRequest;
use crate::errors::BotError;

pub use self::function_handler as handler;

pub const LIVENESS_TEXT: &str = "LINE Bot is running!";
pub const SIGNATURE_HEADER: &str = "X-Line-Signature";

/// Everything built once at cold start and shared by every invocation.
pub struct AppState {
    pub dispatcher: Dispatcher<WeatherClient, LineClient>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`BotError::ConfigError`] if either HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, BotError> {
        Ok(Self {
            dispatcher: Dispatcher::new(
                config.line_channel_secret.clone(),
                WeatherClient::new(config)?,
                LineClient::new(config)?,
            ),
        })
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails in practice; every outcome is rendered as an HTTP response.
pub async fn function_handler(
    state: &AppState,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("webhook", request_id = %request_id, aws_request_id = %event.context.request_id);

    Ok(route_request(&state.dispatcher, &event.payload)
        .instrument(span)
        .await)
}

/// Maps an API Gateway event onto the two routes and renders the response.
pub async fn route_request<W, R>(dispatcher: &Dispatcher<W, R>, payload: &Value) -> Value
where
    W: WeatherSource,
    R: ReplySender,
{
    let method = parsing::request_method(payload).unwrap_or("");
    let path = parsing::request_path(payload).unwrap_or("");
    info!(method = %method, path = %path, "Request received");

    match (method, path.trim_end_matches('/')) {
        ("GET", "") => helpers::ok_text(LIVENESS_TEXT),
        ("POST", "/webhook") => handle_webhook(dispatcher, payload).await,
        (_, "" | "/webhook") => helpers::err_response(405, "Method not allowed"),
        _ => helpers::err_response(404, "Not found"),
    }
}

async fn handle_webhook<W, R>(dispatcher: &Dispatcher<W, R>, payload: &Value) -> Value
where
    W: WeatherSource,
    R: ReplySender,
{
    let body = match parsing::extract_body(payload) {
        Ok(body) => body,
        Err(e) => {
            error!("{}", e);
            return helpers::err_response(e.status_code(), "Invalid body");
        }
    };

    let signature = payload
        .get("headers")
        .and_then(|headers| parsing::get_header_value(headers, SIGNATURE_HEADER))
        .map(ToString::to_string);

    let request = InboundRequest::new(body, signature);

    match dispatcher.dispatch(&request).await {
        Ok(_) => helpers::ok_text("OK"),
        Err(e @ BotError::AuthenticationFailure(_)) => {
            warn!("{}", e);
            helpers::err_response(e.status_code(), "Invalid signature")
        }
        Err(e) => {
            error!("{}", e);
            helpers::err_response(e.status_code(), &e.to_string())
        }
    }
}
