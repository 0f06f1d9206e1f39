//! Numeric coercion with the log-and-skip policy.
//!
//! A value that does not parse costs exactly one metric: it is logged at
//! info, counted, and the caller moves on to the next metric.

use drainprism_core::{EventKind, LogEvent, MetricValue};

use crate::obs::RelayMetrics;

/// Counter label shared by every producer-named `#` sample key.
pub const SAMPLE_METRIC_LABEL: &str = "sample";

/// Number for the fixed field `key` in `ev`, or `None` after logging why not.
pub fn coerce(metrics: &RelayMetrics, ev: &LogEvent, key: &'static str) -> Option<f64> {
    match ev.number(key) {
        Ok(v) => Some(v),
        Err(e) => {
            skip(metrics, ev.kind, key, key, &e);
            None
        }
    }
}

/// Number for a producer-named sample key.
///
/// The full key is logged; the failure counter only sees
/// [`SAMPLE_METRIC_LABEL`] so arbitrary keys cannot grow the series set.
pub fn coerce_sample(
    metrics: &RelayMetrics,
    kind: EventKind,
    key: &str,
    value: &MetricValue,
) -> Option<f64> {
    match value.to_f64() {
        Ok(v) => Some(v),
        Err(e) => {
            skip(metrics, kind, key, SAMPLE_METRIC_LABEL, &e);
            None
        }
    }
}

fn skip(
    metrics: &RelayMetrics,
    kind: EventKind,
    key: &str,
    label: &'static str,
    e: &dyn std::error::Error,
) {
    tracing::info!(%kind, metric = %key, error = %e, "could not parse metric value");
    metrics
        .parse_failures
        .inc(&[("kind", kind.as_str()), ("metric", label)]);
}
