//! Webhook surface: gateway routing, signature checks and dispatch.

pub mod dispatcher;
pub mod handler;
pub mod helpers;
pub mod parsing;
pub mod signature;

pub use dispatcher::Dispatcher;
pub use handler::{AppState, handler};
