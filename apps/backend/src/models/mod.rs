//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use trainer_core::{ModeSummary, ReviewOrder, ReviewRow};
use trainer_core::{CheckOutcome, PracticeSession, Round};

/// What the client may see of a round. The specimen name stays hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub image: String,
    pub revealed: bool,
}

impl RoundView {
    pub fn from_round(round: &Round, revealed: bool) -> Self {
        Self {
            image: round.image.clone(),
            revealed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModesResponse {
    pub modes: Vec<String>,
    pub default_mode: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchModeRequest {
    pub mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub mode: String,
    pub pool_size: usize,
    pub round: Option<RoundView>,
}

impl SessionResponse {
    pub fn from_session(session_id: Uuid, session: &PracticeSession) -> Self {
        Self {
            session_id,
            mode: session.mode().to_string(),
            pool_size: session.pool().len(),
            round: session
                .current()
                .map(|round| RoundView::from_round(round, session.is_revealed())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub guess: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckResponse {
    Judged {
        ok: bool,
        score: f64,
        best_match: Option<String>,
        correct_answer: String,
    },
    Advanced {
        round: Option<RoundView>,
    },
    NoContent,
}

impl From<CheckOutcome> for CheckResponse {
    fn from(outcome: CheckOutcome) -> Self {
        match outcome {
            CheckOutcome::Judged {
                result,
                correct_answer,
            } => Self::Judged {
                ok: result.ok,
                score: result.score,
                best_match: result.best_match,
                correct_answer,
            },
            CheckOutcome::Advanced(round) => Self::Advanced {
                round: round.as_ref().map(|r| RoundView::from_round(r, false)),
            },
            CheckOutcome::NoContent => Self::NoContent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextResponse {
    pub round: Option<RoundView>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub order: Option<ReviewOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub mode: String,
    pub order: ReviewOrder,
    pub rows: Vec<ReviewRow>,
    pub summary: ModeSummary,
}
