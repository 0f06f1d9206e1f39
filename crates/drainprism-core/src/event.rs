//! Structured log events as handed over by the log-parsing producer.
//!
//! Metric values stay in their raw textual form until a handler asks for a
//! number, so a malformed field never blocks ingestion of the whole event.

use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseFloatError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discriminator selecting the handler for a [`LogEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Router,
    Scaling,
    DynoSample,
    PostgresSample,
    RedisSample,
    Release,
    /// Any kind string this build does not know. Dropped by the dispatcher.
    #[serde(other)]
    Unknown,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Router => "router",
            EventKind::Scaling => "scaling",
            EventKind::DynoSample => "dyno_sample",
            EventKind::PostgresSample => "postgres_sample",
            EventKind::RedisSample => "redis_sample",
            EventKind::Release => "release",
            EventKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a metric value could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("metric not present")]
    Missing,
    #[error("invalid number {raw:?}: {source}")]
    Invalid {
        raw: String,
        #[source]
        source: ParseFloatError,
    },
}

/// A single observed value, kept exactly as it appeared in the log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricValue {
    raw: String,
}

impl MetricValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parse the raw text as a base-10 float.
    pub fn to_f64(&self) -> std::result::Result<f64, CoerceError> {
        self.raw.parse::<f64>().map_err(|source| CoerceError::Invalid {
            raw: self.raw.clone(),
            source,
        })
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The unit flowing through the pipeline. Consumed exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub kind: EventKind,
    /// Owning application, used as event namespace and reporting dimension.
    pub app: String,
    /// Prepended verbatim to every metric name emitted for this event.
    #[serde(default)]
    pub metric_prefix: String,
    /// Pre-formed `key:value` tags known by the producer.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricValue>,
    /// Free-text descriptions; only scaling and release events use them.
    #[serde(default)]
    pub events: Vec<String>,
}

impl LogEvent {
    pub fn new(kind: EventKind, app: impl Into<String>) -> Self {
        Self {
            kind,
            app: app.into(),
            metric_prefix: String::new(),
            tags: Vec::new(),
            metrics: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metric_prefix = prefix.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(key.into(), value.into());
        self
    }

    pub fn with_event(mut self, description: impl Into<String>) -> Self {
        self.events.push(description.into());
        self
    }

    /// Numeric value of `key`, coerced at the point of use.
    pub fn number(&self, key: &str) -> std::result::Result<f64, CoerceError> {
        self.metrics.get(key).ok_or(CoerceError::Missing)?.to_f64()
    }

    /// `<prefix><name>`.
    pub fn metric_name(&self, name: &str) -> String {
        format!("{}{}", self.metric_prefix, name)
    }
}
