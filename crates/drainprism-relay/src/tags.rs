//! Tag set construction.
//!
//! Templated tag sets are the event's own tags plus `key:value` for each
//! permitted key found in the metric map, minus excluded keys, sorted.

use std::collections::BTreeMap;

use drainprism_core::MetricValue;

use crate::client::Client;

pub const ROUTER_TAG_KEYS: &[&str] = &[
    "dyno", "method", "status", "host", "code", "desc", "at",
];
pub const SAMPLE_TAG_KEYS: &[&str] = &["source", "dyno"];

/// Extend `tags` from the permitted-key template, then sort.
///
/// Raw event tags are kept verbatim, duplicates included. Missing keys are
/// skipped; this never fails.
pub fn extract_tags(
    excluded: &BTreeMap<String, bool>,
    tags: &[String],
    permitted: &[&str],
    metrics: &BTreeMap<String, MetricValue>,
) -> Vec<String> {
    let mut out = tags.to_vec();
    for key in permitted {
        if excluded.get(*key).copied().unwrap_or(false) {
            continue;
        }
        if let Some(v) = metrics.get(*key) {
            out.push(format!("{key}:{v}"));
        }
    }
    out.sort();
    out
}

impl Client {
    pub fn extract_tags(
        &self,
        tags: &[String],
        permitted: &[&str],
        metrics: &BTreeMap<String, MetricValue>,
    ) -> Vec<String> {
        extract_tags(self.excluded_tags(), tags, permitted, metrics)
    }
}

/// Leading digit of a status code made of exactly three ASCII digits.
pub fn status_family(status: &str) -> Option<char> {
    let b = status.as_bytes();
    if b.len() == 3 && b.iter().all(u8::is_ascii_digit) {
        Some(char::from(b[0]))
    } else {
        None
    }
}

/// Add `statusFamily:<d>xx` when `status` is a three-digit code.
///
/// The tag goes in at its sorted position so a sorted input stays sorted.
pub fn add_status_family(
    metrics: &BTreeMap<String, MetricValue>,
    mut tags: Vec<String>,
) -> Vec<String> {
    let Some(family) = metrics.get("status").and_then(|s| status_family(s.as_str())) else {
        return tags;
    };
    let tag = format!("statusFamily:{family}xx");
    let at = tags.partition_point(|t| t.as_str() <= tag.as_str());
    tags.insert(at, tag);
    tags
}
