//! Specimen selection with even weighting across specimen types.
//!
//! Every specimen in the pool has the same chance of being drawn no matter how
//! many images it carries; the image is drawn afterwards from the chosen
//! specimen. The specimen shown last is skipped unless it is the only one.

use crate::types::Specimen;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A specimen and one of its images, borrowed from the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick<'a> {
    pub specimen: &'a Specimen,
    pub image: &'a str,
}

/// Draw the next specimen and image from the pool.
///
/// Returns `None` when the pool is empty or the drawn specimen has no images.
pub fn select_next<'a, R: Rng + ?Sized>(
    pool: &'a [Specimen],
    last_shown_id: Option<&str>,
    rng: &mut R,
) -> Option<Pick<'a>> {
    if pool.is_empty() {
        return None;
    }

    let candidates: Vec<&Specimen> = pool
        .iter()
        .filter(|s| Some(s.id.as_str()) != last_shown_id)
        .collect();

    let specimen = if candidates.is_empty() {
        // Only the last shown specimen is left
        pool.choose(rng)?
    } else {
        *candidates.choose(rng)?
    };

    let image = specimen.images.choose(rng)?;

    Some(Pick {
        specimen,
        image: image.as_str(),
    })
}

/// The specimen and image currently on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub specimen: Specimen,
    pub image: String,
}

/// Per-session selection state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub last_shown_id: Option<String>,
    pub current: Option<Round>,
    /// Whether the current round's answer has been checked.
    pub revealed: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new round from the pool.
    ///
    /// Clears the current round when nothing can be drawn.
    pub fn advance<R: Rng + ?Sized>(&mut self, pool: &[Specimen], rng: &mut R) -> Option<&Round> {
        self.revealed = false;

        match select_next(pool, self.last_shown_id.as_deref(), rng) {
            Some(pick) => {
                self.last_shown_id = Some(pick.specimen.id.clone());
                self.current = Some(Round {
                    specimen: pick.specimen.clone(),
                    image: pick.image.to_string(),
                });
            }
            None => self.current = None,
        }

        self.current.as_ref()
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Forget everything, including the last shown specimen.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
