//! Per-kind handler behavior against a recording backend.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use drainprism_core::{EventKind, LogEvent};
use drainprism_relay::handlers::{
    handle_router, handle_sample, handle_scaling, sample_metric_name, send_events,
};

mod support;
use support::{client_with, tags, Call, RecordingBackend};

fn router_event() -> LogEvent {
    LogEvent::new(EventKind::Router, "shop")
        .with_prefix("acme.")
        .with_tag("source:web.1")
        .with_metric("at", "info")
        .with_metric("method", "GET")
        .with_metric("status", "200")
        .with_metric("host", "shop.example.com")
        .with_metric("connect", "1")
        .with_metric("service", "18")
        .with_metric("bytes", "4096")
}

#[tokio::test]
async fn router_emits_three_histograms() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &[]);

    handle_router(&client, &router_event()).await;

    let expected_tags = tags(&[
        "at:info",
        "host:shop.example.com",
        "method:GET",
        "source:web.1",
        "status:200",
        "statusFamily:2xx",
    ]);
    let calls = backend.calls();
    assert_eq!(
        calls,
        vec![
            Call::Histogram {
                name: "acme.heroku.router.response.bytes".into(),
                value: 4096.0,
                tags: expected_tags.clone(),
                rate: 1.0
            },
            Call::Histogram {
                name: "acme.heroku.router.request.connect".into(),
                value: 1.0,
                tags: expected_tags.clone(),
                rate: 1.0
            },
            Call::Histogram {
                name: "acme.heroku.router.request.service".into(),
                value: 18.0,
                tags: expected_tags,
                rate: 1.0
            },
        ]
    );
}

#[tokio::test]
async fn router_error_adds_sampled_counter() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &[]);
    let ev = router_event().with_metric("at", "error").with_metric("code", "H12");

    handle_router(&client, &ev).await;

    let calls = backend.calls();
    assert_eq!(calls.len(), 4);
    match &calls[3] {
        Call::Count { name, value, rate, tags } => {
            assert_eq!(name, "acme.heroku.router.error");
            assert_eq!(*value, 1);
            assert_eq!(*rate, 0.1);
            assert!(tags.contains(&"code:H12".to_string()));
        }
        other => panic!("expected count, got {other:?}"),
    }
}

#[tokio::test]
async fn router_fields_fail_independently() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &[]);
    let ev = router_event().with_metric("connect", "N/A");

    handle_router(&client, &ev).await;

    let names: Vec<String> = backend.calls().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(
        names,
        vec!["acme.heroku.router.response.bytes", "acme.heroku.router.request.service"]
    );
    assert_eq!(
        client.metrics().parse_failures.get(&[("kind", "router"), ("metric", "connect")]),
        1
    );
}

#[tokio::test]
async fn router_respects_exclusions() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &["host", "status"]);

    handle_router(&client, &router_event()).await;

    for call in backend.calls() {
        assert!(call.tags().iter().all(|t| !t.starts_with("host:") && !t.starts_with("status:")));
        // The family tag is derived from the metric, not from the templated tag.
        assert!(call.tags().contains(&"statusFamily:2xx".to_string()));
    }
}

#[tokio::test]
async fn backend_failures_are_swallowed() {
    let backend = Arc::new(RecordingBackend::failing());
    let client = client_with(backend.clone(), &[]);

    handle_router(&client, &router_event().with_metric("at", "error")).await;

    assert_eq!(backend.calls().len(), 4);
    assert_eq!(client.metrics().backend_errors.get(&[("call", "histogram")]), 3);
    assert_eq!(client.metrics().backend_errors.get(&[("call", "count")]), 1);
}

#[test]
fn sample_names() {
    assert_eq!(sample_metric_name("sample#cpu-load").as_deref(), Some("cpu_load"));
    assert_eq!(sample_metric_name("sample#memory-total").as_deref(), Some("memory_total"));
    assert_eq!(sample_metric_name("source"), None);
    assert_eq!(sample_metric_name("sample#"), None);
}

#[tokio::test]
async fn sample_gauges_only_for_hash_keys() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &[]);
    let ev = LogEvent::new(EventKind::DynoSample, "shop")
        .with_metric("source", "web.1")
        .with_metric("dyno", "heroku.1234")
        .with_metric("sample#load-avg-1m", "0.42")
        .with_metric("sample#memory-total", "N/A")
        .with_metric("sample#memory_rss", "120.5");

    handle_sample(&client, &ev, "dyno").await;

    assert_eq!(
        backend.calls(),
        vec![
            Call::Gauge {
                name: "heroku.dyno.load_avg_1m".into(),
                value: 0.42,
                tags: tags(&["dyno:heroku.1234", "source:web.1"]),
                rate: 1.0
            },
            Call::Gauge {
                name: "heroku.dyno.memory_rss".into(),
                value: 120.5,
                tags: tags(&["dyno:heroku.1234", "source:web.1"]),
                rate: 1.0
            },
        ]
    );
    assert_eq!(client.metrics().parse_failures.total(), 1);
}

#[tokio::test]
async fn sample_gauges_carry_prefix_and_honor_exclusions() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &["source"]);
    let ev = LogEvent::new(EventKind::PostgresSample, "shop")
        .with_prefix("acme.")
        .with_metric("source", "HEROKU_POSTGRESQL_RED")
        .with_metric("sample#db_size", "1048576")
        .with_metric("sample#", "3");

    handle_sample(&client, &ev, "postgres").await;

    assert_eq!(
        backend.calls(),
        vec![Call::Gauge {
            name: "acme.heroku.postgres.db_size".into(),
            value: 1048576.0,
            tags: vec![],
            rate: 1.0
        }]
    );
}

#[tokio::test]
async fn sample_parse_failures_share_one_series() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &[]);

    for i in 0..50 {
        let ev = LogEvent::new(EventKind::DynoSample, "shop")
            .with_metric(format!("sample#k{i}"), "N/A");
        handle_sample(&client, &ev, "dyno").await;
    }

    let failures = &client.metrics().parse_failures;
    assert_eq!(failures.get(&[("kind", "dyno_sample"), ("metric", "sample")]), 50);
    assert_eq!(failures.total(), 50);
    let rendered = client.metrics().render();
    assert!(!rendered.contains("k49"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn scaling_failure_keeps_sibling_key() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &[]);
    let ev = LogEvent::new(EventKind::Scaling, "shop")
        .with_metric("web", "N/A")
        .with_metric("mailer", "1");

    handle_scaling(&client, &ev).await;

    let names: Vec<String> = backend.calls().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, vec!["heroku.dyno.mailer"]);
    assert_eq!(
        client.metrics().parse_failures.get(&[("kind", "scaling"), ("metric", "web")]),
        1
    );
}

#[tokio::test]
async fn scaling_uses_raw_tags() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &["source"]);
    let ev = LogEvent::new(EventKind::Scaling, "shop")
        .with_tag("source:api")
        .with_tag("app:shop")
        .with_metric("web", "3")
        .with_metric("worker", "2");

    handle_scaling(&client, &ev).await;

    assert_eq!(
        backend.calls(),
        vec![Call::Gauge {
            name: "heroku.dyno.web".into(),
            value: 3.0,
            tags: tags(&["source:api", "app:shop"]),
            rate: 1.0
        }]
    );
}

#[tokio::test]
async fn events_are_titled_by_namespace_and_app() {
    let backend = Arc::new(RecordingBackend::failing());
    let client = client_with(backend.clone(), &[]);
    let descriptions = tags(&["Deploy 1a2b3c", "Set FOO config vars"]);

    send_events(&client, "shop", "app", &descriptions, &tags(&["source:api"])).await;

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        Call::Event {
            title: "app/api: shop".into(),
            text: "Set FOO config vars".into(),
            tags: tags(&["source:api"])
        }
    );
    assert_eq!(client.metrics().backend_errors.get(&[("call", "event")]), 2);
}

#[tokio::test]
async fn send_metric_dispatches_by_label() {
    let backend = Arc::new(RecordingBackend::default());
    let client = client_with(backend.clone(), &[]);

    client.send_metric("count", "jobs.done", 5.0, &[]).await.unwrap();
    client.send_metric("sample", "queue.depth", 7.5, &[]).await.unwrap();
    client.send_metric("measure", "job.runtime", 0.3, &tags(&["queue:default"])).await.unwrap();

    let calls = backend.calls();
    assert_eq!(
        calls[0],
        Call::Count { name: "jobs.done".into(), value: 5, tags: vec![], rate: 1.0 }
    );
    assert!(matches!(&calls[1], Call::Gauge { value, .. } if *value == 7.5));
    assert!(matches!(&calls[2], Call::Histogram { name, .. } if name == "job.runtime"));

    let err = client.send_metric("bogus", "x", 1.0, &[]).await.unwrap_err();
    assert_eq!(err.code().as_str(), "UNKNOWN_METRIC_TYPE");
    assert!(err.to_string().contains("bogus"));
    assert_eq!(backend.calls().len(), 3);
}
