//! Practice session API tests.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use common::fixtures::{self, GENERAL_IMAGES};
use common::TestContext;
use specimen_trainer_backend::models::{CheckResponse, NextResponse, SessionResponse};
use trainer_core::StatsEntry;

/// Test a session without a mode uses the default mode.
#[tokio::test]
async fn test_create_session_default_mode() {
    let ctx = TestContext::new();
    let response = ctx.server.post("/api/sessions").await;
    response.assert_status_ok();

    let body: SessionResponse = response.json();
    assert_eq!(body.mode, "general");
    assert_eq!(body.pool_size, 3);

    let round = body.round.expect("general pool has specimens");
    assert!(GENERAL_IMAGES.contains(&round.image.as_str()));
    assert!(!round.revealed);
}

/// Test the round never leaks the specimen name.
#[tokio::test]
async fn test_round_hides_answer() {
    let ctx = TestContext::new();
    let response = ctx
        .server
        .post("/api/sessions")
        .json(&fixtures::create_session_request(Some("ores")))
        .await;

    let body: serde_json::Value = response.json();
    let round = body["round"].as_object().unwrap();
    assert_eq!(round.len(), 2);
    assert_eq!(round["image"], "galena-1.jpg");
    assert_eq!(round["revealed"], false);
}

/// Test a correct guess is judged and counted once.
#[tokio::test]
async fn test_check_correct_guess() {
    let ctx = TestContext::new();
    let session = ctx.start_session("ores").await;

    let response = ctx
        .server
        .post(&TestContext::session_path(session.session_id, "check"))
        .json(&fixtures::check_request("galéna"))
        .await;
    response.assert_status_ok();

    let body: CheckResponse = response.json();
    assert_eq!(
        body,
        CheckResponse::Judged {
            ok: true,
            score: 1.0,
            best_match: Some("Galena".to_string()),
            correct_answer: "Galena".to_string(),
        }
    );
    assert_eq!(
        ctx.stored_stats("ores")["galena"],
        StatsEntry { seen: 1, correct: 1 }
    );
}

/// Test a wrong guess reveals the right answer.
#[tokio::test]
async fn test_check_wrong_guess() {
    let ctx = TestContext::new();
    let session = ctx.start_session("ores").await;

    let body: CheckResponse = ctx
        .server
        .post(&TestContext::session_path(session.session_id, "check"))
        .json(&fixtures::check_request("pyrite"))
        .await
        .json();

    match body {
        CheckResponse::Judged {
            ok, correct_answer, ..
        } => {
            assert!(!ok);
            assert_eq!(correct_answer, "Galena");
        }
        other => panic!("expected judged, got {other:?}"),
    }
    assert_eq!(
        ctx.stored_stats("ores")["galena"],
        StatsEntry { seen: 1, correct: 0 }
    );
}

/// Test checking a revealed round moves on instead of scoring again.
#[tokio::test]
async fn test_check_after_reveal_advances() {
    let ctx = TestContext::new();
    let session = ctx.start_session("ores").await;
    let path = TestContext::session_path(session.session_id, "check");

    ctx.server.post(&path).json(&fixtures::check_request("galena")).await;
    let body: CheckResponse = ctx
        .server
        .post(&path)
        .json(&fixtures::check_request("galena"))
        .await
        .json();

    match body {
        CheckResponse::Advanced { round: Some(round) } => {
            assert_eq!(round.image, "galena-1.jpg");
            assert!(!round.revealed);
        }
        other => panic!("expected advance, got {other:?}"),
    }
    assert_eq!(ctx.stored_stats("ores")["galena"].seen, 1);
}

/// Test a blank guess is a normal miss, not an error.
#[tokio::test]
async fn test_check_blank_guess() {
    let ctx = TestContext::new();
    let session = ctx.start_session("ores").await;

    let body: CheckResponse = ctx
        .server
        .post(&TestContext::session_path(session.session_id, "check"))
        .json(&fixtures::check_request("   "))
        .await
        .json();

    assert_eq!(
        body,
        CheckResponse::Judged {
            ok: false,
            score: 0.0,
            best_match: None,
            correct_answer: "Galena".to_string(),
        }
    );
}

/// Test an empty pool reports no content.
#[tokio::test]
async fn test_empty_mode_has_no_content() {
    let ctx = TestContext::new();
    let session = ctx.start_session("metamorphic").await;
    assert_eq!(session.pool_size, 0);
    assert!(session.round.is_none());

    let body: CheckResponse = ctx
        .server
        .post(&TestContext::session_path(session.session_id, "check"))
        .json(&fixtures::check_request("quartz"))
        .await
        .json();
    assert_eq!(body, CheckResponse::NoContent);
    assert!(ctx.stored_stats("metamorphic").is_empty());
}

/// Test consecutive rounds never repeat a specimen.
#[tokio::test]
async fn test_next_never_repeats_specimen() {
    let ctx = TestContext::new();
    let session = ctx.start_session("general").await;
    let path = TestContext::session_path(session.session_id, "next");

    let specimen_of = |image: &str| image.split('-').next().unwrap_or_default().to_string();
    let mut previous = specimen_of(&session.round.unwrap().image);

    for _ in 0..30 {
        let body: NextResponse = ctx.server.post(&path).await.json();
        let current = specimen_of(&body.round.unwrap().image);
        assert_ne!(current, previous);
        previous = current;
    }
}

/// Test switching mode recomputes the pool.
#[tokio::test]
async fn test_switch_mode() {
    let ctx = TestContext::new();
    let session = ctx.start_session("general").await;

    let response = ctx
        .server
        .put(&TestContext::session_path(session.session_id, "mode"))
        .json(&fixtures::switch_mode_request("ores"))
        .await;
    response.assert_status_ok();

    let body: SessionResponse = response.json();
    assert_eq!(body.mode, "ores");
    assert_eq!(body.pool_size, 1);
    assert_eq!(body.round.unwrap().image, "galena-1.jpg");
}

/// Test a blank mode is rejected.
#[tokio::test]
async fn test_switch_to_blank_mode() {
    let ctx = TestContext::new();
    let session = ctx.start_session("general").await;

    let response = ctx
        .server
        .put(&TestContext::session_path(session.session_id, "mode"))
        .json(&fixtures::switch_mode_request("  "))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

/// Test session lookup after check shows the revealed state.
#[tokio::test]
async fn test_show_session() {
    let ctx = TestContext::new();
    let session = ctx.start_session("ores").await;
    ctx.server
        .post(&TestContext::session_path(session.session_id, "check"))
        .json(&fixtures::check_request("galena"))
        .await;

    let body: SessionResponse = ctx
        .server
        .get(&TestContext::session_path(session.session_id, ""))
        .await
        .json();
    assert_eq!(body.session_id, session.session_id);
    assert!(body.round.unwrap().revealed);
}

/// Test unknown sessions return 404.
#[tokio::test]
async fn test_unknown_session() {
    let ctx = TestContext::new();
    let response = ctx
        .server
        .post(&TestContext::session_path(Uuid::new_v4(), "next"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test deleting a session.
#[tokio::test]
async fn test_delete_session() {
    let ctx = TestContext::new();
    let session = ctx.start_session("general").await;
    let path = TestContext::session_path(session.session_id, "");

    let body: serde_json::Value = ctx.server.delete(&path).await.json();
    assert_eq!(body["deleted"], true);

    ctx.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = ctx.server.delete(&path).await.json();
    assert_eq!(body["deleted"], false);
}

/// Test sessions keep independent round state.
#[tokio::test]
async fn test_sessions_are_independent() {
    let ctx = TestContext::new();
    let first = ctx.start_session("ores").await;
    let second = ctx.start_session("ores").await;

    ctx.server
        .post(&TestContext::session_path(first.session_id, "check"))
        .json(&fixtures::check_request("galena"))
        .await;

    let other: SessionResponse = ctx
        .server
        .get(&TestContext::session_path(second.session_id, ""))
        .await
        .json();
    assert!(!other.round.unwrap().revealed);

    // Both sessions share the mode's stats
    ctx.server
        .post(&TestContext::session_path(second.session_id, "check"))
        .json(&fixtures::check_request("galena"))
        .await;
    assert_eq!(
        ctx.stored_stats("ores")["galena"],
        StatsEntry { seen: 2, correct: 2 }
    );
}

/// Test idle sessions are dropped when a new one starts.
#[tokio::test]
async fn test_idle_sessions_expire() {
    let ctx = TestContext::with_session_ttl(Duration::from_nanos(1));
    let first = ctx.start_session("general").await;
    let second = ctx.start_session("ores").await;

    ctx.server
        .get(&TestContext::session_path(first.session_id, ""))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(ctx.state.sessions.lock().unwrap().len(), 1);

    // Stats written before expiry are kept
    let body: CheckResponse = ctx
        .server
        .post(&TestContext::session_path(second.session_id, "check"))
        .json(&fixtures::check_request("galena"))
        .await
        .json();
    assert!(matches!(body, CheckResponse::Judged { ok: true, .. }));
}

/// Test active sessions survive other clients starting sessions.
#[tokio::test]
async fn test_active_sessions_are_kept() {
    let ctx = TestContext::new();
    let first = ctx.start_session("general").await;
    ctx.start_session("ores").await;

    ctx.server
        .get(&TestContext::session_path(first.session_id, ""))
        .await
        .assert_status_ok();
    assert_eq!(ctx.state.sessions.lock().unwrap().len(), 2);
}
