//! Router request events: three histograms and an error counter.

use drainprism_core::LogEvent;

use crate::client::{Client, FULL_RATE};
use crate::coerce::coerce;
use crate::tags::{add_status_family, ROUTER_TAG_KEYS};

/// Router errors are frequent enough to be sampled.
pub const ROUTER_ERROR_RATE: f64 = 0.1;

// https://devcenter.heroku.com/articles/http-routing
const HISTOGRAMS: [(&str, &str); 3] = [
    ("bytes", "heroku.router.response.bytes"),
    ("connect", "heroku.router.request.connect"),
    ("service", "heroku.router.request.service"),
];

pub async fn handle_router(client: &Client, ev: &LogEvent) {
    let tags = client.extract_tags(&ev.tags, ROUTER_TAG_KEYS, &ev.metrics);
    let tags = add_status_family(&ev.metrics, tags);

    tracing::debug!(app = %ev.app, ?tags, prefix = %ev.metric_prefix, "router message");

    // Each field stands alone: a bad `connect` does not cost `service` or `bytes`.
    for (key, name) in HISTOGRAMS {
        let Some(v) = coerce(client.metrics(), ev, key) else {
            continue;
        };
        let name = ev.metric_name(name);
        let res = client.backend().histogram(&name, v, &tags, FULL_RATE).await;
        client.report("histogram", &name, res);
    }

    if ev.metrics.get("at").map(|v| v.as_str()) == Some("error") {
        let name = ev.metric_name("heroku.router.error");
        let res = client.backend().count(&name, 1, &tags, ROUTER_ERROR_RATE).await;
        client.report("count", &name, res);
    }
}
