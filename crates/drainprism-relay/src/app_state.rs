//! Shared application state for the relay's HTTP intake.

use std::sync::Arc;

use tokio::sync::mpsc;

use drainprism_core::LogEvent;

use crate::client::Client;
use crate::obs::RelayMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    events_tx: mpsc::Sender<LogEvent>,
    client: Client,
    max_batch: usize,
}

impl AppState {
    /// `events_tx` feeds the dispatcher; once every clone of the state is
    /// dropped the channel closes and the dispatcher drains and stops.
    pub fn new(events_tx: mpsc::Sender<LogEvent>, client: Client, max_batch: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                events_tx,
                client,
                max_batch,
            }),
        }
    }

    pub fn events_tx(&self) -> &mpsc::Sender<LogEvent> {
        &self.inner.events_tx
    }

    pub fn client(&self) -> &Client {
        &self.inner.client
    }

    pub fn metrics(&self) -> &RelayMetrics {
        self.inner.client.metrics()
    }

    pub fn max_batch(&self) -> usize {
        self.inner.max_batch
    }
}
