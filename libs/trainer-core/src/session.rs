//! One user's practice session: active mode, its pool and the round state.
//!
//! Rounds move `unrevealed -> revealed` on a check and back to `unrevealed`
//! when the next specimen is drawn. Checking a revealed round draws the next
//! one instead of scoring the same specimen twice.

use crate::catalog::Catalog;
use crate::error::StoreResult;
use crate::matching::{verify_answer, MatchResult};
use crate::selection::{Round, SelectionState};
use crate::storage::{self, KeyValueStore};
use crate::types::{Specimen, TrainerSettings};
use rand::Rng;

/// What a check did.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// The pool is empty, nothing to check against.
    NoContent,
    /// The round was already revealed; a new round was drawn.
    Advanced(Option<Round>),
    /// The guess was scored and counted.
    Judged {
        result: MatchResult,
        correct_answer: String,
    },
}

#[derive(Debug, Clone)]
pub struct PracticeSession {
    mode: String,
    pool: Vec<Specimen>,
    selection: SelectionState,
}

impl PracticeSession {
    /// Start a session in `mode` and draw its first round.
    pub fn start<R: Rng + ?Sized>(catalog: &Catalog, mode: &str, rng: &mut R) -> Self {
        let mut session = Self {
            mode: String::new(),
            pool: Vec::new(),
            selection: SelectionState::new(),
        };
        session.switch_mode(catalog, mode, rng);
        session
    }

    /// Change mode, recompute the pool and draw a fresh round.
    pub fn switch_mode<R: Rng + ?Sized>(
        &mut self,
        catalog: &Catalog,
        mode: &str,
        rng: &mut R,
    ) -> Option<&Round> {
        self.mode = mode.to_string();
        self.pool = catalog.pool(mode);
        self.selection.reset();

        if self.pool.is_empty() {
            tracing::debug!(mode, "no eligible specimens for mode");
        }

        self.selection.advance(&self.pool, rng)
    }

    /// Skip to the next round.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Round> {
        self.selection.advance(&self.pool, rng)
    }

    /// Check a guess against the current round.
    ///
    /// Each scored check records exactly one attempt in the mode's stats.
    pub fn check<S, R>(
        &mut self,
        guess: &str,
        store: &mut S,
        settings: &TrainerSettings,
        rng: &mut R,
    ) -> StoreResult<CheckOutcome>
    where
        S: KeyValueStore + ?Sized,
        R: Rng + ?Sized,
    {
        if self.selection.revealed {
            let round = self.next(rng).cloned();
            return Ok(CheckOutcome::Advanced(round));
        }

        let Some(round) = self.selection.current.as_ref() else {
            return Ok(CheckOutcome::NoContent);
        };

        let result = verify_answer(guess, &round.specimen, settings.match_threshold);
        let entry =
            storage::record_attempt_in(store, &self.mode, &round.specimen.id, result.ok)?;

        tracing::debug!(
            mode = %self.mode,
            specimen = %round.specimen.id,
            ok = result.ok,
            score = result.score,
            seen = entry.seen,
            "checked guess"
        );

        let correct_answer = round.specimen.display.clone();
        self.selection.reveal();

        Ok(CheckOutcome::Judged {
            result,
            correct_answer,
        })
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn pool(&self) -> &[Specimen] {
        &self.pool
    }

    pub fn current(&self) -> Option<&Round> {
        self.selection.current.as_ref()
    }

    pub fn is_revealed(&self) -> bool {
        self.selection.revealed
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
}
