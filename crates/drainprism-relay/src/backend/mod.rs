//! Metrics backend seam.
//!
//! Handlers only talk to [`MetricsBackend`]; the production implementation
//! is [`StatsdBackend`], tests plug in a recording double.

pub mod statsd;

use async_trait::async_trait;

use drainprism_core::error::Result;

pub use statsd::StatsdBackend;

/// Outbound protocol calls. Every call is fire-and-forget: an `Err` means the
/// datagram was not handed to the transport and will not be retried.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    async fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()>;
    async fn histogram(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()>;
    async fn count(&self, name: &str, value: i64, tags: &[String], rate: f64) -> Result<()>;
    async fn event(&self, title: &str, text: &str, tags: &[String]) -> Result<()>;
}
