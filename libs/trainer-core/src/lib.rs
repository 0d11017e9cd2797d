//! Core library of the specimen identification trainer.
//!
//! Provides:
//! - Answer matching (normalization, Levenshtein distance, similarity)
//! - Specimen selection weighted evenly across specimen types
//! - Per-mode accuracy stats and review ranking
//! - Catalog loading and a key/value persistence port
//! - Practice sessions tying the above together

pub mod catalog;
pub mod error;
pub mod matching;
pub mod selection;
pub mod session;
pub mod stats;
pub mod storage;
pub mod types;

pub use catalog::{parse, Catalog};
pub use error::{CatalogError, Result, StoreError, StoreResult};
pub use matching::{
    levenshtein_distance, normalize, similarity, verify_answer, MatchResult,
    DEFAULT_MATCH_THRESHOLD,
};
pub use selection::{select_next, Pick, Round, SelectionState};
pub use session::{CheckOutcome, PracticeSession};
pub use stats::{
    accuracy, rank_for_review, record_attempt, reset_mode, summarize, ModeSummary, ReviewRow,
    StatsEntry, StatsMap,
};
pub use storage::{
    load_stats, read_stats, record_attempt_in, reset_mode_in, save_stats, stats_key,
    KeyValueStore, MemoryStore,
};
pub use types::{ReviewOrder, Specimen, TrainerSettings};
