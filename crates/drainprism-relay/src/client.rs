//! Process-wide metrics client: backend handle plus the tag exclusion set.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use drainprism_core::error::{DrainError, Result};

use crate::backend::MetricsBackend;
use crate::obs::RelayMetrics;

/// Sampling rate for everything except the router error counter.
pub const FULL_RATE: f64 = 1.0;

/// Target of the generic metric sender, keyed by its textual label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Gauge,
    Histogram,
    Count,
}

impl FromStr for MetricType {
    type Err = DrainError;

    fn from_str(label: &str) -> Result<Self> {
        match label {
            "metric" | "sample" => Ok(MetricType::Gauge),
            "measure" => Ok(MetricType::Histogram),
            "count" => Ok(MetricType::Count),
            other => Err(DrainError::UnknownMetricType(other.to_string())),
        }
    }
}

/// Cheap to clone; the exclusion set is fixed at construction.
#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn MetricsBackend>,
    excluded_tags: Arc<BTreeMap<String, bool>>,
    metrics: Arc<RelayMetrics>,
}

impl Client {
    pub fn new(
        backend: Arc<dyn MetricsBackend>,
        excluded_tags: BTreeMap<String, bool>,
        metrics: Arc<RelayMetrics>,
    ) -> Self {
        Self {
            backend,
            excluded_tags: Arc::new(excluded_tags),
            metrics,
        }
    }

    pub fn backend(&self) -> &dyn MetricsBackend {
        self.backend.as_ref()
    }

    pub fn excluded_tags(&self) -> &BTreeMap<String, bool> {
        &self.excluded_tags
    }

    pub fn metrics(&self) -> &RelayMetrics {
        &self.metrics
    }

    /// Log-and-swallow for backend results inside the pipeline.
    pub fn report(&self, call: &'static str, name: &str, res: Result<()>) {
        if let Err(e) = res {
            tracing::info!(call, metric = %name, error = %e, "failed to send to metrics backend");
            self.metrics.backend_errors.inc(&[("call", call)]);
        }
    }

    /// Send a metric whose name and value the caller already knows.
    ///
    /// `metric`/`sample` become gauges, `measure` a histogram, `count` a
    /// counter (value truncated toward zero). Unlike the event pipeline this
    /// returns errors to the caller, including unknown type labels.
    pub async fn send_metric(
        &self,
        metric_type: &str,
        name: &str,
        value: f64,
        tags: &[String],
    ) -> Result<()> {
        match metric_type.parse::<MetricType>()? {
            MetricType::Gauge => self.backend.gauge(name, value, tags, FULL_RATE).await,
            MetricType::Histogram => self.backend.histogram(name, value, tags, FULL_RATE).await,
            MetricType::Count => self.backend.count(name, value as i64, tags, FULL_RATE).await,
        }
    }
}
