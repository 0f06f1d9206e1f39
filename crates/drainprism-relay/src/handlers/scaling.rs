//! Scaling events: current formation size per process type.

use drainprism_core::LogEvent;

use crate::client::{Client, FULL_RATE};
use crate::coerce::coerce;

pub const SCALING_KEYS: &[&str] = &["mailer", "web"];

/// Gauges `heroku.dyno.<type>` for each scaled process type present.
///
/// Tags are the event's raw tags: no template, no exclusion, no sorting.
pub async fn handle_scaling(client: &Client, ev: &LogEvent) {
    let tags = &ev.tags;

    tracing::debug!(app = %ev.app, ?tags, prefix = %ev.metric_prefix, "scaling message");

    for key in SCALING_KEYS {
        if !ev.metrics.contains_key(*key) {
            continue;
        }
        let Some(v) = coerce(client.metrics(), ev, *key) else {
            continue;
        };
        let name = ev.metric_name(&format!("heroku.dyno.{key}"));
        let res = client.backend().gauge(&name, v, tags, FULL_RATE).await;
        client.report("gauge", &name, res);
    }
}
