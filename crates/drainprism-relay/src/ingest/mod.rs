//! HTTP intake: the producer side of the inbound event channel.
//!
//! Events arrive already parsed (JSON), are pushed onto the bounded channel
//! in order, and the request waits for capacity when the dispatcher lags.

pub mod http;

pub use http::{EventBatch, IngestError, MetricRequest};
