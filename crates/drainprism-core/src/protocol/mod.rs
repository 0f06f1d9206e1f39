//! Wire formats spoken towards the metrics daemon.

pub mod statsd;
