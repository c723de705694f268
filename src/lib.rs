//! Tenki Bot - a LINE chat bot that answers weather questions for Tokyo and
//! echoes everything else.
//!
//! The crate is deployed as a single AWS Lambda behind API Gateway:
//! 1. `GET /` answers a liveness probe
//! 2. `POST /webhook` verifies the `X-Line-Signature` header, parses the
//!    webhook envelope and replies to every text message through the LINE
//!    reply API
//!
//! # Architecture
//!
//! - [`api`] gateway routing, signature verification and the dispatcher
//! - [`bot`] pure intent routing and reply composition
//! - [`clients`] the OpenWeather and LINE HTTP clients behind traits
//! - [`core`] configuration and the request-scoped data model
//!
//! # Example
//!
//! ```no_run
//! use tenki_bot::api::AppState;
//! use tenki_bot::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     tenki_bot::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let state = AppState::new(&config)?;
//!
//!     let payload = serde_json::json!({
//!         "rawPath": "/",
//!         "requestContext": { "http": { "method": "GET" } }
//!     });
//!     let response = tenki_bot::api::handler::route_request(&state.dispatcher, &payload).await;
//!     println!("{response}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod clients;
pub mod core;
pub mod errors;

pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output goes to stdout for `CloudWatch` Logs. The filter comes from `RUST_LOG`,
/// defaulting to `info` (`debug` with the `debug-logs` feature). Calling it more
/// than once is harmless.
///
/// # Example
///
/// ```
/// tenki_bot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let default_level = if cfg!(feature = "debug-logs") {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
