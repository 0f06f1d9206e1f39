use std::collections::BTreeMap;
use std::net::SocketAddr;

use serde::Deserialize;
use drainprism_core::error::{DrainError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrainConfig {
    pub version: u32,

    #[serde(default)]
    pub statsd: StatsdSection,

    #[serde(default)]
    pub ingest: IngestSection,

    /// Tag keys suppressed from every templated tag set (`key: true`).
    #[serde(default)]
    pub excluded_tags: BTreeMap<String, bool>,
}

impl DrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DrainError::UnsupportedVersion);
        }
        self.statsd.validate()?;
        self.ingest.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsdSection {
    #[serde(default = "default_statsd_addr")]
    pub addr: String,
}

impl Default for StatsdSection {
    fn default() -> Self {
        Self { addr: default_statsd_addr() }
    }
}

impl StatsdSection {
    pub fn validate(&self) -> Result<()> {
        parse_addr("statsd.addr", &self.addr).map(|_| ())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        parse_addr("statsd.addr", &self.addr)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    #[serde(default = "default_max_batch")]
    pub max_batch: usize,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            channel_capacity: default_channel_capacity(),
            max_batch: default_max_batch(),
        }
    }
}

impl IngestSection {
    pub fn validate(&self) -> Result<()> {
        parse_addr("ingest.listen", &self.listen)?;
        if !(1..=1_000_000).contains(&self.channel_capacity) {
            return Err(DrainError::BadRequest(
                "ingest.channel_capacity must be between 1 and 1000000".into(),
            ));
        }
        if !(1..=100_000).contains(&self.max_batch) {
            return Err(DrainError::BadRequest(
                "ingest.max_batch must be between 1 and 100000".into(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        parse_addr("ingest.listen", &self.listen)
    }
}

fn parse_addr(field: &str, s: &str) -> Result<SocketAddr> {
    s.parse()
        .map_err(|e| DrainError::BadRequest(format!("{field} must be a valid SocketAddr: {e}")))
}

fn default_statsd_addr() -> String {
    "127.0.0.1:8125".into()
}
fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_channel_capacity() -> usize {
    1024
}
fn default_max_batch() -> usize {
    1000
}
