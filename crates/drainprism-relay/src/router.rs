//! Axum router wiring.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ingest};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", post(ingest::http::post_events))
        .route("/v1/metrics", post(ingest::http::post_metric))
        .route("/healthz", get(ingest::http::healthz))
        .route("/metrics", get(ingest::http::metrics))
        .with_state(state)
}
