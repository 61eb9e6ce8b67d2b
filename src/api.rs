use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use tower_http::cors::CorsLayer;

use crate::config::EngineConfig;
use crate::history::{History, SkewEntry};
use crate::hypothesis::HypothesisRecord;
use crate::normalize::{distribute, Distribution};
use crate::score::RawScore;
use crate::skew::{derive_skew_with, SkewResult};

#[derive(Clone)]
pub struct AppState {
    config: EngineConfig,
    history: Arc<History>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            history: Arc::new(History::with_capacity(2000)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/normalize", post(normalize_scores))
        .route("/skew", post(derive_skew))
        .route("/debug/history", get(debug_history))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn normalize_scores(
    State(state): State<AppState>,
    Json(scores): Json<Vec<Option<RawScore>>>,
) -> Json<Distribution> {
    counter!("normalize_requests_total").increment(1);

    // Null elements count as missing scores, not errors.
    let points: Vec<i32> = scores
        .iter()
        .map(|s| s.as_ref().map(RawScore::points).unwrap_or(0))
        .collect();
    let dist = distribute(&points, state.config.bands);
    if dist.degraded.is_some() {
        counter!("distribution_degraded_total").increment(1);
    }
    Json(dist)
}

#[derive(serde::Deserialize)]
struct SkewReq {
    /// Missing or empty items yield the canonical neutral result.
    #[serde(default)]
    items: Vec<HypothesisRecord>,
}

async fn derive_skew(State(state): State<AppState>, Json(body): Json<SkewReq>) -> Json<SkewResult> {
    counter!("skew_requests_total").increment(1);

    let result = derive_skew_with(&body.items, state.config.bands, state.config.dead_band);
    if result.degraded.is_some() {
        counter!("distribution_degraded_total").increment(1);
    }
    state.history.push(&result);
    Json(result)
}

#[derive(serde::Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

async fn debug_history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> Json<Vec<SkewEntry>> {
    let limit = q.limit.unwrap_or(50);
    Json(state.history.snapshot_last_n(limit))
}
