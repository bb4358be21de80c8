//! External Services
//!
//! Services the compose view talks to outside its own state:
//! - api: background worker running Composer REST calls
//! - timers: scoped one-shot timers
//! - handoff: once-only import handoff to the data import view

pub mod api;
pub mod handoff;
pub mod timers;

pub use api::{ApiRequest, ApiResponse};
pub use timers::{TimerEvent, TimerService};
