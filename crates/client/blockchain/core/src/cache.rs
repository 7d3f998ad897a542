//! Read-through cache for team state queries.
//!
//! Entries are keyed by team id and tagged with their load status. A fresh
//! `Ready` entry answers [`ReadCache::fetch`] without touching the reader;
//! anything else (miss, stale entry, recorded error, abandoned load) triggers
//! a new read whose outcome replaces the entry, unless the entry was
//! invalidated or reloaded while the read was in flight.
//!
//! Writes never touch the cache. Callers that submit a write for a team and
//! want the next read to reflect it must call [`ReadCache::invalidate`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::traits::{ReadError, TeamReader};
use crate::types::{ContractState, TeamId};

/// Default freshness window for cached reads.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Load status of a cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    /// A read is in flight.
    Loading,

    /// Last read succeeded.
    Ready(ContractState),

    /// Last read failed; kept until the next fetch attempt.
    Error(ReadError),
}

#[derive(Debug)]
struct CacheEntry {
    status: CacheStatus,
    generation: u64,
    updated_at: Instant,
}

/// Memoizes [`TeamReader::fetch_team_info`] results per team id.
///
/// The entry map lock is never held across a read, so one slow read does not
/// block lookups for other ids.
pub struct ReadCache<R> {
    reader: R,
    ttl: Duration,
    entries: Mutex<HashMap<TeamId, CacheEntry>>,
    next_generation: AtomicU64,
}

impl<R: TeamReader> ReadCache<R> {
    pub fn new(reader: R, ttl: Duration) -> Self {
        Self {
            reader,
            ttl,
            entries: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached state if fresh, otherwise read through.
    ///
    /// # Errors
    ///
    /// Returns the reader's [`ReadError`]; the error is also recorded as the
    /// entry's status.
    pub async fn fetch(&self, team_id: TeamId) -> Result<ContractState, ReadError> {
        let generation = {
            let mut entries = self.entries.lock().await;
            if let Some(state) = entries.get(&team_id).and_then(|e| self.fresh_state(e)) {
                tracing::debug!(%team_id, "Team info cache hit");
                return Ok(state);
            }

            tracing::debug!(%team_id, "Team info cache miss");
            entries.retain(|id, entry| *id == team_id || !self.is_expired(entry));

            let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
            entries.insert(
                team_id,
                CacheEntry {
                    status: CacheStatus::Loading,
                    generation,
                    updated_at: Instant::now(),
                },
            );
            generation
        };

        let result = self.reader.fetch_team_info(team_id).await;

        let status = match &result {
            Ok(state) => CacheStatus::Ready(state.clone()),
            Err(err) => {
                tracing::warn!(%team_id, error = %err, "Team info read failed");
                CacheStatus::Error(err.clone())
            }
        };

        // Only the load that still owns the entry may record its outcome. An
        // invalidate or a newer fetch in the meantime supersedes it.
        let mut entries = self.entries.lock().await;
        match entries.get_mut(&team_id) {
            Some(entry) if entry.generation == generation => {
                entry.status = status;
                entry.updated_at = Instant::now();
            }
            _ => tracing::debug!(%team_id, "Discarding superseded team info read"),
        }

        result
    }

    /// Peek at an entry without reading through.
    pub async fn status(&self, team_id: TeamId) -> Option<CacheStatus> {
        self.entries
            .lock()
            .await
            .get(&team_id)
            .map(|entry| entry.status.clone())
    }

    /// Whether `team_id` holds a `Ready` entry inside the freshness window.
    pub async fn is_fresh(&self, team_id: TeamId) -> bool {
        self.entries
            .lock()
            .await
            .get(&team_id)
            .and_then(|e| self.fresh_state(e))
            .is_some()
    }

    /// Drop the entry for `team_id`. Returns whether one existed.
    pub async fn invalidate(&self, team_id: TeamId) -> bool {
        let removed = self.entries.lock().await.remove(&team_id).is_some();
        if removed {
            tracing::debug!(%team_id, "Team info cache entry invalidated");
        }
        removed
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    fn fresh_state(&self, entry: &CacheEntry) -> Option<ContractState> {
        match &entry.status {
            CacheStatus::Ready(state) if entry.updated_at.elapsed() < self.ttl => {
                Some(state.clone())
            }
            _ => None,
        }
    }

    /// Stale `Ready` entries are dropped when another id is loaded. Errors
    /// and in-flight loads stay until the next attempt for their id.
    fn is_expired(&self, entry: &CacheEntry) -> bool {
        matches!(entry.status, CacheStatus::Ready(_)) && entry.updated_at.elapsed() >= self.ttl
    }
}

#[async_trait]
impl<R: TeamReader> TeamReader for ReadCache<R> {
    async fn fetch_team_info(&self, team_id: TeamId) -> Result<ContractState, ReadError> {
        self.fetch(team_id).await
    }
}
