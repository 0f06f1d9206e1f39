use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use drainprism_core::error::{DrainError, ErrorCode};
use drainprism_core::LogEvent;

use crate::app_state::AppState;

/// Body of `POST /v1/events`: a JSON array of events or a single event.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EventBatch {
    Many(Vec<LogEvent>),
    One(Box<LogEvent>),
}

impl EventBatch {
    pub fn into_vec(self) -> Vec<LogEvent> {
        match self {
            EventBatch::Many(v) => v,
            EventBatch::One(ev) => vec![*ev],
        }
    }
}

/// Body of `POST /v1/metrics`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricRequest {
    #[serde(rename = "type")]
    pub metric_type: String,
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Drain(#[from] DrainError),
    #[error("batch of {len} events exceeds max_batch {max}")]
    BatchTooLarge { len: usize, max: usize },
    #[error("event channel closed")]
    Closed,
}

impl IngestError {
    fn status(&self) -> StatusCode {
        match self {
            IngestError::Drain(e) => match e.code() {
                ErrorCode::BadRequest | ErrorCode::UnknownMetricType => StatusCode::BAD_REQUEST,
                ErrorCode::Transport => StatusCode::BAD_GATEWAY,
                ErrorCode::UnsupportedVersion | ErrorCode::Internal => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            IngestError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            IngestError::Closed => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            IngestError::Drain(e) => e.code().as_str(),
            IngestError::BatchTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            IngestError::Closed => "UNAVAILABLE",
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            IngestError::Drain(_) => "invalid",
            IngestError::BatchTooLarge { .. } => "too_large",
            IngestError::Closed => "closed",
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let body = json!({ "code": self.code(), "msg": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

fn rejected(state: &AppState, err: IngestError) -> IngestError {
    tracing::info!(error = %err, "ingest request rejected");
    state.metrics().ingest_rejected.inc(&[("reason", err.reason())]);
    err
}

pub async fn post_events(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, IngestError> {
    let batch: EventBatch = serde_json::from_slice(&body).map_err(|e| {
        rejected(&state, DrainError::BadRequest(format!("invalid events json: {e}")).into())
    })?;
    let events = batch.into_vec();
    if events.len() > state.max_batch() {
        return Err(rejected(
            &state,
            IngestError::BatchTooLarge { len: events.len(), max: state.max_batch() },
        ));
    }

    let accepted = events.len();
    for ev in events {
        state
            .events_tx()
            .send(ev)
            .await
            .map_err(|_| rejected(&state, IngestError::Closed))?;
    }
    Ok((StatusCode::ACCEPTED, Json(json!({ "accepted": accepted }))).into_response())
}

pub async fn post_metric(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, IngestError> {
    let req: MetricRequest = serde_json::from_slice(&body).map_err(|e| {
        rejected(&state, DrainError::BadRequest(format!("invalid metric json: {e}")).into())
    })?;
    state
        .client()
        .send_metric(&req.metric_type, &req.name, req.value, &req.tags)
        .await
        .map_err(|e| rejected(&state, e.into()))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics().render()
}
