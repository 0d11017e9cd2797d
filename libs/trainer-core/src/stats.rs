//! Per-specimen accuracy bookkeeping for one practice mode.

use crate::types::{ReviewOrder, Specimen};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Attempt counters for one specimen. `correct` never exceeds `seen`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub seen: u32,
    pub correct: u32,
}

impl StatsEntry {
    /// Fraction answered correctly, `None` if never attempted.
    pub fn accuracy(&self) -> Option<f64> {
        if self.seen == 0 {
            None
        } else {
            Some(self.correct as f64 / self.seen as f64)
        }
    }
}

/// Stats for one mode, keyed by specimen id.
pub type StatsMap = BTreeMap<String, StatsEntry>;

/// Count one verified attempt. Returns the updated entry.
pub fn record_attempt(stats: &mut StatsMap, specimen_id: &str, was_correct: bool) -> StatsEntry {
    let entry = stats.entry(specimen_id.to_string()).or_default();
    entry.seen = entry.seen.saturating_add(1);
    if was_correct {
        entry.correct = entry.correct.saturating_add(1).min(entry.seen);
    }
    *entry
}

pub fn accuracy(entry: &StatsEntry) -> Option<f64> {
    entry.accuracy()
}

/// Clear every entry of the mode.
pub fn reset_mode(stats: &mut StatsMap) {
    stats.clear();
}

/// One line of the review listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRow {
    pub name: String,
    pub id: String,
    pub seen: u32,
    pub correct: u32,
    pub accuracy: Option<f64>,
}

/// List every pool specimen with its counters, sorted for review.
pub fn rank_for_review(pool: &[Specimen], stats: &StatsMap, order: ReviewOrder) -> Vec<ReviewRow> {
    let mut rows: Vec<ReviewRow> = pool
        .iter()
        .map(|specimen| {
            let entry = stats.get(&specimen.id).copied().unwrap_or_default();
            ReviewRow {
                name: specimen.display.clone(),
                id: specimen.id.clone(),
                seen: entry.seen,
                correct: entry.correct,
                accuracy: entry.accuracy(),
            }
        })
        .collect();

    rows.sort_by(|a, b| compare_rows(a, b, order));
    rows
}

fn compare_rows(a: &ReviewRow, b: &ReviewRow, order: ReviewOrder) -> Ordering {
    let by_accuracy = match (a.accuracy, b.accuracy) {
        (Some(x), Some(y)) => match order {
            ReviewOrder::StrongestFirst => y.total_cmp(&x),
            ReviewOrder::WeakestFirst => x.total_cmp(&y),
        },
        (Some(_), None) => match order {
            ReviewOrder::StrongestFirst => Ordering::Less,
            ReviewOrder::WeakestFirst => Ordering::Greater,
        },
        (None, Some(_)) => match order {
            ReviewOrder::StrongestFirst => Ordering::Greater,
            ReviewOrder::WeakestFirst => Ordering::Less,
        },
        (None, None) => Ordering::Equal,
    };

    by_accuracy
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Totals over the pool for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSummary {
    pub seen: u64,
    pub correct: u64,
    /// `None` until something in the pool has been attempted.
    pub accuracy: Option<f64>,
}

/// Aggregate accuracy of the pool.
pub fn summarize(pool: &[Specimen], stats: &StatsMap) -> ModeSummary {
    let (seen, correct) = pool
        .iter()
        .filter_map(|specimen| stats.get(&specimen.id))
        .fold((0u64, 0u64), |(seen, correct), entry| {
            (seen + entry.seen as u64, correct + entry.correct as u64)
        });

    ModeSummary {
        seen,
        correct,
        accuracy: (seen > 0).then(|| correct as f64 / seen as f64),
    }
}
