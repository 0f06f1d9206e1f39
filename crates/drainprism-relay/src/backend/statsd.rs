//! UDP DogStatsD backend.
//!
//! Sampling happens here, before encoding: a call at rate `r < 1` is sent
//! with probability `r` and carries `|@r` so the daemon can scale it back.

use std::net::SocketAddr;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::net::UdpSocket;

use drainprism_core::error::{DrainError, Result};
use drainprism_core::protocol::statsd::{encode_event, encode_float, encode_metric, MetricKind};

use super::MetricsBackend;

/// One connected UDP socket, at most one datagram per call.
pub struct StatsdBackend {
    socket: UdpSocket,
    rng: Mutex<StdRng>,
}

impl StatsdBackend {
    pub async fn connect(peer: SocketAddr) -> Result<Self> {
        Self::connect_with_rng(peer, StdRng::from_entropy()).await
    }

    /// Deterministic sampling decisions, for reproducible runs.
    pub async fn connect_seeded(peer: SocketAddr, seed: u64) -> Result<Self> {
        Self::connect_with_rng(peer, StdRng::seed_from_u64(seed)).await
    }

    async fn connect_with_rng(peer: SocketAddr, rng: StdRng) -> Result<Self> {
        let local: SocketAddr = if peer.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(peer).await?;
        tracing::info!(%peer, "statsd backend connected");
        Ok(Self {
            socket,
            rng: Mutex::new(rng),
        })
    }

    /// Whether this occurrence is transmitted at `rate`.
    fn sampled(&self, rate: f64) -> bool {
        if rate >= 1.0 {
            return true;
        }
        let mut rng = match self.rng.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen::<f64>() < rate
    }

    async fn send(&self, datagram: Bytes) -> Result<()> {
        let n = self.socket.send(&datagram).await?;
        if n != datagram.len() {
            return Err(DrainError::Transport(format!(
                "short datagram write: {n} of {} bytes",
                datagram.len()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl MetricsBackend for StatsdBackend {
    async fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()> {
        if !self.sampled(rate) {
            return Ok(());
        }
        self.send(encode_float(name, value, MetricKind::Gauge, rate, tags)).await
    }

    async fn histogram(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()> {
        if !self.sampled(rate) {
            return Ok(());
        }
        self.send(encode_float(name, value, MetricKind::Histogram, rate, tags)).await
    }

    async fn count(&self, name: &str, value: i64, tags: &[String], rate: f64) -> Result<()> {
        if !self.sampled(rate) {
            return Ok(());
        }
        self.send(encode_metric(name, &value.to_string(), MetricKind::Count, rate, tags))
            .await
    }

    async fn event(&self, title: &str, text: &str, tags: &[String]) -> Result<()> {
        self.send(encode_event(title, text, tags)).await
    }
}
