//! One handler per event kind.
//!
//! Handlers never return errors: parse failures and backend failures are
//! logged and counted, and the worst outcome of bad data is a missing metric.

pub mod events;
pub mod router;
pub mod sample;
pub mod scaling;

pub use events::{send_events, APP_NAMESPACE, HEROKU_NAMESPACE};
pub use router::handle_router;
pub use sample::{handle_sample, sample_metric_name};
pub use scaling::handle_scaling;
