//! Key/value persistence port and the stats records stored through it.
//!
//! Stats for a mode are kept as one JSON object under
//! `rmtrainer_stats_v1_<mode>`, mapping specimen id to `{seen, correct}`.
//! Missing or corrupt records load as an empty map. Read-modify-write
//! updates refuse to run when the store itself cannot be read, so a
//! backend failure never overwrites a mode's history.

use crate::error::StoreResult;
use crate::stats::{self, StatsEntry, StatsMap};
use std::collections::HashMap;

/// Prefix of the per-mode stats key.
pub const STATS_KEY_PREFIX: &str = "rmtrainer_stats_v1_";

/// Storage for opaque string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// In-process store, mainly for tests and single-run tools.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

pub fn stats_key(mode: &str) -> String {
    format!("{STATS_KEY_PREFIX}{mode}")
}

/// Read a mode's stats, propagating backend errors.
///
/// A missing record is an empty map and a corrupt one is logged and
/// treated as empty.
pub fn read_stats<S: KeyValueStore + ?Sized>(store: &S, mode: &str) -> StoreResult<StatsMap> {
    let key = stats_key(mode);
    Ok(match store.get(&key)? {
        Some(raw) => decode_stats(&key, &raw),
        None => StatsMap::new(),
    })
}

/// Load a mode's stats, falling back to an empty map on any failure.
pub fn load_stats<S: KeyValueStore + ?Sized>(store: &S, mode: &str) -> StatsMap {
    read_stats(store, mode).unwrap_or_else(|err| {
        tracing::warn!(mode, error = %err, "could not read stats, starting empty");
        StatsMap::new()
    })
}

fn decode_stats(key: &str, raw: &str) -> StatsMap {
    match serde_json::from_str::<StatsMap>(raw) {
        Ok(mut map) => {
            for entry in map.values_mut() {
                entry.correct = entry.correct.min(entry.seen);
            }
            map
        }
        Err(err) => {
            tracing::warn!(%key, error = %err, "corrupt stats record, starting empty");
            StatsMap::new()
        }
    }
}

pub fn save_stats<S: KeyValueStore + ?Sized>(
    store: &mut S,
    mode: &str,
    stats: &StatsMap,
) -> StoreResult<()> {
    let raw = serde_json::to_string(stats)?;
    store.set(&stats_key(mode), &raw)
}

/// Record one attempt as a single read-modify-write of the mode's stats.
pub fn record_attempt_in<S: KeyValueStore + ?Sized>(
    store: &mut S,
    mode: &str,
    specimen_id: &str,
    was_correct: bool,
) -> StoreResult<StatsEntry> {
    let mut map = read_stats(store, mode)?;
    let entry = stats::record_attempt(&mut map, specimen_id, was_correct);
    save_stats(store, mode, &map)?;
    Ok(entry)
}

/// Clear a mode's stats; other modes are untouched.
pub fn reset_mode_in<S: KeyValueStore + ?Sized>(store: &mut S, mode: &str) -> StoreResult<()> {
    let mut map = read_stats(store, mode)?;
    stats::reset_mode(&mut map);
    save_stats(store, mode, &map)
}
