//! Practice session endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use trainer_core::PracticeSession;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::{lock, AppState};

/// Trim a mode name, rejecting blanks.
pub(crate) fn validate_mode(mode: &str) -> Result<String> {
    let mode = mode.trim();
    if mode.is_empty() {
        return Err(ApiError::BadRequest("mode must not be blank".to_string()));
    }
    Ok(mode.to_string())
}

fn session_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("session {id}"))
}

/// POST /api/sessions
pub async fn create(
    State(state): State<AppState>,
    payload: Option<Json<CreateSessionRequest>>,
) -> Result<Json<SessionResponse>> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let mode = match request.mode {
        Some(mode) => validate_mode(&mode)?,
        None => state.catalog.default_mode(&state.settings.default_mode),
    };

    let mut sessions = lock(&state.sessions, "sessions")?;
    sessions.prune_idle();

    let session = {
        let mut rng = lock(&state.rng, "rng")?;
        PracticeSession::start(&state.catalog, &mode, &mut *rng)
    };

    let session_id = Uuid::new_v4();
    let response = SessionResponse::from_session(session_id, &session);
    sessions.insert(session_id, session);

    tracing::info!(
        %session_id,
        %mode,
        pool_size = response.pool_size,
        live_sessions = sessions.len(),
        "session started"
    );
    Ok(Json(response))
}

/// GET /api/sessions/:id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let mut sessions = lock(&state.sessions, "sessions")?;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    Ok(Json(SessionResponse::from_session(id, session)))
}

/// DELETE /api/sessions/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = lock(&state.sessions, "sessions")?.remove(&id);
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

/// POST /api/sessions/:id/check
pub async fn check(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResponse>> {
    let mut sessions = lock(&state.sessions, "sessions")?;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    // The store lock spans the whole read-modify-write of the attempt
    let mut store = lock(&state.store, "store")?;
    let mut rng = lock(&state.rng, "rng")?;
    let outcome = session.check(&payload.guess, &mut *store, &state.settings, &mut *rng)?;

    Ok(Json(outcome.into()))
}

/// POST /api/sessions/:id/next
pub async fn next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NextResponse>> {
    let mut sessions = lock(&state.sessions, "sessions")?;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    let mut rng = lock(&state.rng, "rng")?;
    let round = session
        .next(&mut *rng)
        .map(|round| RoundView::from_round(round, false));

    Ok(Json(NextResponse { round }))
}

/// PUT /api/sessions/:id/mode
pub async fn switch_mode(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SwitchModeRequest>,
) -> Result<Json<SessionResponse>> {
    let mode = validate_mode(&payload.mode)?;

    let mut sessions = lock(&state.sessions, "sessions")?;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;

    let mut rng = lock(&state.rng, "rng")?;
    session.switch_mode(&state.catalog, &mode, &mut *rng);
    tracing::info!(session_id = %id, %mode, "session switched mode");

    Ok(Json(SessionResponse::from_session(id, session)))
}
