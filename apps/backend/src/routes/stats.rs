//! Stats endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use trainer_core::{load_stats, rank_for_review, reset_mode_in, summarize};

use crate::error::Result;
use crate::models::{StatsQuery, StatsResponse};
use crate::routes::sessions::validate_mode;
use crate::{lock, AppState};

/// GET /api/stats/:mode
pub async fn show(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>> {
    let mode = validate_mode(&mode)?;
    let order = query.order.unwrap_or(state.settings.review_order);

    let stats = {
        let store = lock(&state.store, "store")?;
        load_stats(&*store, &mode)
    };

    let pool = state.catalog.pool(&mode);

    Ok(Json(StatsResponse {
        rows: rank_for_review(&pool, &stats, order),
        summary: summarize(&pool, &stats),
        mode,
        order,
    }))
}

/// DELETE /api/stats/:mode
pub async fn reset(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let mode = validate_mode(&mode)?;

    let mut store = lock(&state.store, "store")?;
    reset_mode_in(&mut *store, &mode)?;
    tracing::info!(%mode, "stats reset");

    Ok(Json(serde_json::json!({ "reset": true })))
}
