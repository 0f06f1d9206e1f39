//! Label-keyed counters for the relay's own health.
//!
//! Labels are flattened into sorted key vectors so the same label set always
//! lands on the same counter regardless of call-site ordering.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum over every label set.
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

#[derive(Default)]
pub struct RelayMetrics {
    /// Events taken off the inbound channel, by kind.
    pub events: CounterVec,
    pub events_dropped: CounterVec,
    /// Metric values that failed numeric coercion, by kind and metric key.
    pub parse_failures: CounterVec,
    /// Backend calls that returned an error, by call type.
    pub backend_errors: CounterVec,
    pub ingest_rejected: CounterVec,
}

impl RelayMetrics {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.events.render("drainprism_events_total", &mut out);
        self.events_dropped.render("drainprism_events_dropped_total", &mut out);
        self.parse_failures.render("drainprism_parse_failures_total", &mut out);
        self.backend_errors.render("drainprism_backend_errors_total", &mut out);
        self.ingest_rejected.render("drainprism_ingest_rejected_total", &mut out);
        out
    }
}
