//! Recording backend shared by relay integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use drainprism_core::error::{DrainError, Result};
use drainprism_relay::backend::MetricsBackend;
use drainprism_relay::client::Client;
use drainprism_relay::obs::RelayMetrics;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Gauge { name: String, value: f64, tags: Vec<String>, rate: f64 },
    Histogram { name: String, value: f64, tags: Vec<String>, rate: f64 },
    Count { name: String, value: i64, tags: Vec<String>, rate: f64 },
    Event { title: String, text: String, tags: Vec<String> },
}

impl Call {
    pub fn name(&self) -> &str {
        match self {
            Call::Gauge { name, .. }
            | Call::Histogram { name, .. }
            | Call::Count { name, .. } => name,
            Call::Event { title, .. } => title,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Call::Gauge { tags, .. }
            | Call::Histogram { tags, .. }
            | Call::Count { tags, .. }
            | Call::Event { tags, .. } => tags,
        }
    }
}

/// Records every call; optionally fails them all after recording.
#[derive(Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    fail: AtomicBool,
}

impl RecordingBackend {
    pub fn failing() -> Self {
        let b = Self::default();
        b.fail.store(true, Ordering::Relaxed);
        b
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::Relaxed) {
            return Err(DrainError::Transport("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl MetricsBackend for RecordingBackend {
    async fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()> {
        self.record(Call::Gauge { name: name.into(), value, tags: tags.to_vec(), rate })
    }

    async fn histogram(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()> {
        self.record(Call::Histogram { name: name.into(), value, tags: tags.to_vec(), rate })
    }

    async fn count(&self, name: &str, value: i64, tags: &[String], rate: f64) -> Result<()> {
        self.record(Call::Count { name: name.into(), value, tags: tags.to_vec(), rate })
    }

    async fn event(&self, title: &str, text: &str, tags: &[String]) -> Result<()> {
        self.record(Call::Event { title: title.into(), text: text.into(), tags: tags.to_vec() })
    }
}

pub fn client_with(backend: Arc<RecordingBackend>, excluded: &[&str]) -> Client {
    let excluded: BTreeMap<String, bool> = excluded.iter().map(|k| (k.to_string(), true)).collect();
    Client::new(backend, excluded, Arc::new(RelayMetrics::default()))
}

pub fn tags(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}
