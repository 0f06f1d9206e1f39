//! drainPrism core: the structured log-event model, error types, and the
//! DogStatsD wire encoder.
//!
//! This crate carries no runtime or network dependencies so the event model
//! can be shared by the relay, producers, and test tooling.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed values
//! surface as `DrainError`/`CoerceError` so a bad log line can never take the
//! relay down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod protocol;

/// Shared result type.
pub use error::{DrainError, Result};
pub use event::{CoerceError, EventKind, LogEvent, MetricValue};
