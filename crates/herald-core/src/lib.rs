//! Core infrastructure for the Herald push notification service.
//!
//! Holds the application state (store and transport adapters, injected at
//! construction so every feature is testable against fakes) and the
//! record-creation event bus feature crates subscribe to.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod events;
pub mod prelude;

pub use app::{Adapters, App, AppBuilderOpts, AppState};
pub use events::EventBus;

// vim: ts=4
