//! Business Logic
//!
//! Pure functions that can be unit tested without a runtime:
//! - errors: API error classification and alert detail formatting
//! - layers: Hidden-layer round-tripping, visibility, reorder and removal
//! - ui: Focus cycling, list selection and alert expiry

pub mod errors;
pub mod layers;
pub mod ui;
