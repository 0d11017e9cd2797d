//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to an in-memory SQLite store
//! - A seeded RNG so rounds are reproducible
//! - Helper functions for creating test data

#![allow(dead_code)]

pub mod fixtures;

use std::time::Duration;

use axum_test::TestServer;
use uuid::Uuid;

use specimen_trainer_backend::db::SqliteStore;
use specimen_trainer_backend::models::SessionResponse;
use specimen_trainer_backend::{router, AppState};
use trainer_core::{load_stats, StatsMap, TrainerSettings};

/// Seed used for every test context.
pub const TEST_SEED: u64 = 7;

/// Test context holding the shared state and a test server.
pub struct TestContext {
    pub state: AppState,
    pub server: TestServer,
}

impl TestContext {
    /// Create a context over the fixture catalog with default settings.
    pub fn new() -> Self {
        Self::with_settings(TrainerSettings::default())
    }

    pub fn with_settings(settings: TrainerSettings) -> Self {
        Self::with_state(Self::state(settings))
    }

    /// Create a context whose sessions expire after `ttl` of inactivity.
    pub fn with_session_ttl(ttl: Duration) -> Self {
        Self::with_state(Self::state(TrainerSettings::default()).with_session_ttl(ttl))
    }

    fn state(settings: TrainerSettings) -> AppState {
        let store = SqliteStore::open_in_memory().expect("Failed to open in-memory store");
        AppState::new(fixtures::catalog(), settings, store, Some(TEST_SEED))
    }

    fn with_state(state: AppState) -> Self {
        let server = TestServer::new(router(state.clone())).expect("Failed to start test server");

        Self { state, server }
    }

    /// Start a session in `mode` and return its response body.
    pub async fn start_session(&self, mode: &str) -> SessionResponse {
        let response = self
            .server
            .post("/api/sessions")
            .json(&fixtures::create_session_request(Some(mode)))
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// Stats currently persisted for a mode.
    pub fn stored_stats(&self, mode: &str) -> StatsMap {
        let store = self.state.store.lock().expect("store lock");
        load_stats(&*store, mode)
    }

    pub fn session_path(id: Uuid, action: &str) -> String {
        if action.is_empty() {
            format!("/api/sessions/{id}")
        } else {
            format!("/api/sessions/{id}/{action}")
        }
    }
}
