//! DogStatsD datagram encoding.
//!
//! Metric: `<name>:<value>|<type>[|@<rate>][|#<tag>,<tag>]`
//! Event:  `_e{<title_len>,<text_len>}:<title>|<text>[|#<tag>,<tag>]`
//!
//! Lengths are UTF-8 byte counts of the encoded title/text. Encoding never
//! fails; validation of names and tags is the producer's business.

use std::fmt::Write;

use bytes::{BufMut, Bytes, BytesMut};

/// Metric type suffix on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Histogram,
    Count,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "g",
            MetricKind::Histogram => "h",
            MetricKind::Count => "c",
        }
    }
}

/// Encode a gauge/histogram/count datagram. `value` is already rendered.
pub fn encode_metric<S: AsRef<str>>(
    name: &str,
    value: &str,
    kind: MetricKind,
    sample_rate: f64,
    tags: &[S],
) -> Bytes {
    let mut buf = BytesMut::with_capacity(name.len() + value.len() + 16);
    buf.put_slice(name.as_bytes());
    buf.put_u8(b':');
    buf.put_slice(value.as_bytes());
    buf.put_u8(b'|');
    buf.put_slice(kind.as_str().as_bytes());
    if sample_rate < 1.0 {
        let mut rate = String::new();
        let _ = write!(rate, "|@{sample_rate}");
        buf.put_slice(rate.as_bytes());
    }
    put_tags(&mut buf, tags);
    buf.freeze()
}

/// Encode a float metric value in shortest round-trip form (`12`, `0.25`).
pub fn encode_float<S: AsRef<str>>(
    name: &str,
    value: f64,
    kind: MetricKind,
    sample_rate: f64,
    tags: &[S],
) -> Bytes {
    encode_metric(name, &value.to_string(), kind, sample_rate, tags)
}

/// Encode a discrete event.
pub fn encode_event<S: AsRef<str>>(title: &str, text: &str, tags: &[S]) -> Bytes {
    let title = escape_newlines(title);
    let text = escape_newlines(text);

    let mut header = String::new();
    let _ = write!(header, "_e{{{},{}}}:", title.len(), text.len());

    let mut buf = BytesMut::with_capacity(header.len() + title.len() + text.len() + 16);
    buf.put_slice(header.as_bytes());
    buf.put_slice(title.as_bytes());
    buf.put_u8(b'|');
    buf.put_slice(text.as_bytes());
    put_tags(&mut buf, tags);
    buf.freeze()
}

fn escape_newlines(s: &str) -> String {
    s.replace('\n', "\\n")
}

fn put_tags<S: AsRef<str>>(buf: &mut BytesMut, tags: &[S]) {
    if tags.is_empty() {
        return;
    }
    buf.put_slice(b"|#");
    for (i, t) in tags.iter().enumerate() {
        if i > 0 {
            buf.put_u8(b',');
        }
        buf.put_slice(t.as_ref().as_bytes());
    }
}
