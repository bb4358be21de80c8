//! Map Compose Library
//!
//! The compose view-model and everything it talks to. The binary adds
//! the terminal front end on top.

pub mod api;
pub mod app;
pub mod handlers;
pub mod logic;
pub mod messages;
pub mod model;
pub mod services;

pub use app::{ComposeApp, ComposeSettings};
