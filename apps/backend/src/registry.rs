//! In-memory practice sessions with idle expiry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use trainer_core::PracticeSession;
use uuid::Uuid;

/// Sessions untouched for this long are dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

struct Entry {
    session: PracticeSession,
    last_used: Instant,
}

/// Live sessions keyed by id. Every lookup refreshes the session's idle clock.
pub struct SessionRegistry {
    entries: HashMap<Uuid, Entry>,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn insert(&mut self, id: Uuid, session: PracticeSession) {
        self.entries.insert(
            id,
            Entry {
                session,
                last_used: Instant::now(),
            },
        );
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut PracticeSession> {
        self.get_mut_at(id, Instant::now())
    }

    fn get_mut_at(&mut self, id: &Uuid, now: Instant) -> Option<&mut PracticeSession> {
        let entry = self.entries.get_mut(id)?;
        entry.last_used = now;
        Some(&mut entry.session)
    }

    pub fn remove(&mut self, id: &Uuid) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop sessions idle for at least the TTL. Returns how many went.
    pub fn prune_idle(&mut self) -> usize {
        self.prune_idle_at(Instant::now())
    }

    fn prune_idle_at(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.last_used) < ttl);

        let pruned = before - self.entries.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = self.entries.len(), "expired idle sessions");
        }
        pruned
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}
