//! Recency-ordered search history with deduplication, a fixed size bound and
//! a single-slot, time-limited undo buffer for the last removed entry.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::model::HistoryEntry;
use crate::persistence::HistoryPersistence;

/// Upper bound on the number of remembered searches; the oldest entry is
/// evicted when a new one would exceed it.
pub const MAX_HISTORY: usize = 10;

/// How long a removed entry stays restorable before the undo slot expires.
pub const UNDO_WINDOW: Duration = Duration::from_millis(5000);

#[derive(Debug)]
struct UndoSlot {
    entry: HistoryEntry,
    expires_at: Instant,
}

/// Owner of the search-history list.
///
/// Index 0 is always the most recently searched entry. Every mutation
/// updates the in-memory list first and then writes the full snapshot back
/// through the injected persistence; write failures are logged and the
/// in-memory list stays authoritative for the session.
///
/// The undo slot carries its own expiry deadline instead of a detached
/// timer: the deadline is checked whenever the slot is observed or mutated,
/// and a newer removal overwrites slot and deadline together, which
/// supersedes the previous window.
#[derive(Debug)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    removed: Option<UndoSlot>,
    persistence: Box<dyn HistoryPersistence>,
}

impl HistoryStore {
    /// Create a store from a persisted snapshot. A missing snapshot yields an
    /// empty history; a malformed one is discarded with a warning. Never
    /// fails to the caller.
    pub fn load(persistence: Box<dyn HistoryPersistence>) -> Self {
        let entries = match persistence.read() {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(%err, "discarding malformed search-history snapshot");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "failed to read search-history snapshot");
                Vec::new()
            }
        };

        Self {
            entries,
            removed: None,
            persistence,
        }
    }

    /// Entries in recency order, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a search. A matching entry (case-insensitive city name, exact
    /// country) keeps its id, gets a fresh `searched_at` and moves to the
    /// front; otherwise a new entry is prepended and the oldest beyond
    /// [`MAX_HISTORY`] is evicted.
    pub fn add(&mut self, city_name: &str, country: &str) {
        self.add_at(city_name, country, Utc::now().timestamp_millis());
    }

    pub fn add_at(&mut self, city_name: &str, country: &str, searched_at: i64) {
        let existing = self
            .entries
            .iter()
            .position(|entry| entry.matches(city_name, country));

        match existing {
            Some(index) => {
                let mut entry = self.entries.remove(index);
                entry.searched_at = searched_at;
                self.entries.insert(0, entry);
            }
            None => {
                self.entries.insert(
                    0,
                    HistoryEntry {
                        id: Uuid::new_v4().to_string(),
                        city_name: city_name.to_string(),
                        country: country.to_string(),
                        searched_at,
                    },
                );
                self.entries.truncate(MAX_HISTORY);
            }
        }

        self.write_back();
    }

    /// Remove the entry with the given id, if present, and arm the undo slot
    /// for it. Removing a second entry while a window is pending replaces
    /// the slot and its deadline. No-op for an unknown id.
    pub fn remove(&mut self, id: &str) {
        self.remove_at(id, Instant::now());
    }

    pub fn remove_at(&mut self, id: &str, now: Instant) {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return;
        };

        let entry = self.entries.remove(index);
        self.removed = Some(UndoSlot {
            entry,
            expires_at: now + UNDO_WINDOW,
        });
        self.write_back();
    }

    /// The last removed entry, while its undo window is still open.
    pub fn recently_removed(&mut self) -> Option<&HistoryEntry> {
        self.recently_removed_at(Instant::now())
    }

    pub fn recently_removed_at(&mut self, now: Instant) -> Option<&HistoryEntry> {
        self.expire_undo(now);
        self.removed.as_ref().map(|slot| &slot.entry)
    }

    /// Restore the last removed entry to the front of the list and disarm
    /// the undo slot. No-op when the slot is empty or already expired.
    pub fn undo_remove(&mut self) {
        self.undo_remove_at(Instant::now());
    }

    pub fn undo_remove_at(&mut self, now: Instant) {
        self.expire_undo(now);
        if let Some(slot) = self.removed.take() {
            self.entries.insert(0, slot.entry);
            self.entries.truncate(MAX_HISTORY);
            self.write_back();
        }
    }

    /// Drop every entry and the undo slot, and clear the snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.removed = None;
        if let Err(err) = self.persistence.clear() {
            warn!(%err, "failed to clear persisted search history");
        }
    }

    /// Pure lookup by id.
    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn expire_undo(&mut self, now: Instant) {
        if self
            .removed
            .as_ref()
            .is_some_and(|slot| now >= slot.expires_at)
        {
            self.removed = None;
        }
    }

    fn write_back(&self) {
        let payload = match serde_json::to_string(&self.entries) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(%err, "failed to serialize search history");
                return;
            }
        };

        if let Err(err) = self.persistence.write(&payload) {
            warn!(%err, "failed to persist search history");
        }
    }
}
