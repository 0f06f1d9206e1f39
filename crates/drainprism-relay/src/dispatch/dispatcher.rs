use tokio::sync::mpsc;

use drainprism_core::{EventKind, LogEvent};

use crate::client::Client;
use crate::handlers::{
    handle_router, handle_sample, handle_scaling, send_events, APP_NAMESPACE, HEROKU_NAMESPACE,
};

/// The single consumer of the inbound event channel.
///
/// Events are handled one at a time in arrival order; each backend call is
/// awaited before the next one is issued.
pub struct Dispatcher {
    client: Client,
}

impl Dispatcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Drain `rx` until every sender is gone.
    ///
    /// Events queued before the channel closed are still delivered; closure is
    /// the only way this returns.
    pub async fn run(self, mut rx: mpsc::Receiver<LogEvent>) {
        while let Some(ev) = rx.recv().await {
            self.dispatch(&ev).await;
        }
        tracing::info!("inbound channel closed, dispatcher stopping");
    }

    /// Route one event to its handler.
    pub async fn dispatch(&self, ev: &LogEvent) {
        tracing::debug!(
            kind = %ev.kind,
            app = %ev.app,
            tags = ?ev.tags,
            prefix = %ev.metric_prefix,
            "log event received"
        );
        let metrics = self.client.metrics();
        metrics.events.inc(&[("kind", ev.kind.as_str())]);

        match ev.kind {
            EventKind::Router => handle_router(&self.client, ev).await,
            EventKind::DynoSample => handle_sample(&self.client, ev, "dyno").await,
            EventKind::PostgresSample => handle_sample(&self.client, ev, "postgres").await,
            EventKind::RedisSample => handle_sample(&self.client, ev, "redis").await,
            EventKind::Scaling => {
                send_events(&self.client, &ev.app, HEROKU_NAMESPACE, &ev.events, &ev.tags)
                    .await;
                handle_scaling(&self.client, ev).await;
            }
            EventKind::Release => {
                send_events(&self.client, &ev.app, APP_NAMESPACE, &ev.events, &ev.tags).await;
            }
            EventKind::Unknown => {
                tracing::warn!(kind = %ev.kind, app = %ev.app, "unknown log message");
                metrics.events_dropped.inc(&[("reason", "unknown_kind")]);
            }
        }
    }
}
