//! Resource samples (dyno, postgres, redis): one gauge per `#`-keyed metric.

use drainprism_core::LogEvent;

use crate::client::{Client, FULL_RATE};
use crate::coerce::coerce_sample;
use crate::tags::SAMPLE_TAG_KEYS;

/// `sample#memory-total` -> `memory_total`; keys without `#`, or with nothing
/// after it, are not samples.
pub fn sample_metric_name(key: &str) -> Option<String> {
    key.split('#')
        .nth(1)
        .filter(|m| !m.is_empty())
        .map(|m| m.replace('-', "_"))
}

pub async fn handle_sample(client: &Client, ev: &LogEvent, sample_type: &str) {
    let tags = client.extract_tags(&ev.tags, SAMPLE_TAG_KEYS, &ev.metrics);

    tracing::debug!(
        app = %ev.app,
        ?tags,
        prefix = %ev.metric_prefix,
        sample_type,
        "sample message"
    );

    for (key, value) in &ev.metrics {
        let Some(metric) = sample_metric_name(key) else {
            continue;
        };
        let Some(v) = coerce_sample(client.metrics(), ev.kind, key, value) else {
            continue;
        };
        let name = ev.metric_name(&format!("heroku.{sample_type}.{metric}"));
        let res = client.backend().gauge(&name, v, &tags, FULL_RATE).await;
        client.report("gauge", &name, res);
    }
}
