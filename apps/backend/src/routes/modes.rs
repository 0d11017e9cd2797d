//! Mode endpoints

use axum::{extract::State, Json};

use crate::models::ModesResponse;
use crate::AppState;

/// GET /api/modes
pub async fn list(State(state): State<AppState>) -> Json<ModesResponse> {
    Json(ModesResponse {
        modes: state.catalog.modes(),
        default_mode: state.catalog.default_mode(&state.settings.default_mode),
    })
}
