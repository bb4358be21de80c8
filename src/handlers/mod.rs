//! Event Handlers
//!
//! This module contains handlers for the events that reach the compose view:
//! - api: responses from the background API worker
//! - timers: scoped timers firing
//! - keyboard: user keyboard input
//!
//! Handlers take `&mut ComposeApp` and dispatch to its methods.

pub mod api;
pub mod keyboard;
pub mod timers;

pub use api::handle_api_response;
pub use keyboard::handle_key;
pub use timers::handle_timer;
