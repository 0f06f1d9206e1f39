//! drainPrism relay library entry.
//!
//! This crate turns structured platform log events into DogStatsD calls:
//! the dispatcher drains the inbound channel, handlers derive tags and
//! numbers, and the backend ships datagrams to the metrics daemon. The HTTP
//! intake and config loader around it are consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod backend;
pub mod client;
pub mod coerce;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod ingest;
pub mod obs;
pub mod router;
pub mod tags;
