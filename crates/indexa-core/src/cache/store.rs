// ── Keyed query cache ──
//
// Type-erased values keyed by `QueryKey`, each stamped with the instant it
// was fetched. Lookups go through `DashMap`; every invalidation or removal
// is broadcast so callers (and tests) can observe exactly what happened.
//
// Each key also owns a slot: a fetch lock so concurrent misses share one
// request, and a generation that invalidation bumps so a response that was
// in flight across an invalidation is stored already stale.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, broadcast};
use tokio::time::Instant;
use tracing::debug;

use super::QueryKey;
use crate::error::QueryError;

const EVENT_CAPACITY: usize = 64;

type ErasedValue = Arc<dyn Any + Send + Sync>;

struct CacheEntry {
    value: ErasedValue,
    fetched_at: Instant,
    invalidated: bool,
}

#[derive(Default)]
struct KeySlot {
    generation: AtomicU64,
    fetching: Mutex<()>,
}

impl KeySlot {
    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Change published on [`QueryCache::subscribe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A fetch result was stored under `key`.
    Stored { key: QueryKey },
    /// Entries under `prefix` were marked stale. Published even when
    /// `matched` is zero.
    Invalidated { prefix: QueryKey, matched: usize },
    /// Entries under `prefix` were dropped.
    Removed { prefix: QueryKey, matched: usize },
    /// Every entry was dropped.
    Cleared { matched: usize },
}

/// Shared cache of query results.
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    slots: DashMap<QueryKey, Arc<KeySlot>>,
    events: broadcast::Sender<CacheEvent>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: DashMap::new(),
            slots: DashMap::new(),
            events,
        }
    }

    /// Return the cached value for `key` if it is fresh, otherwise run
    /// `fetcher` and store what it returns.
    ///
    /// An entry is fresh when it holds a `T`, has not been invalidated and
    /// is younger than `stale_time`. A zero `stale_time` always refetches.
    /// Failed fetches leave the cache untouched.
    ///
    /// Concurrent misses on one key wait for the first fetch and reuse its
    /// result. A result whose key was invalidated, removed or cleared while
    /// the fetch ran is returned to the caller but stored as stale.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: QueryKey,
        stale_time: Duration,
        fetcher: F,
    ) -> Result<Arc<T>, QueryError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, QueryError>>,
    {
        if let Some(hit) = self.fresh::<T>(&key, stale_time) {
            debug!(%key, "cache hit");
            return Ok(hit);
        }

        let slot = self.slot(&key);
        let _fetching = slot.fetching.lock().await;
        if let Some(hit) = self.fresh::<T>(&key, stale_time) {
            debug!(%key, "cache hit after concurrent fetch");
            return Ok(hit);
        }

        let generation = slot.generation.load(Ordering::SeqCst);
        debug!(%key, "cache miss, fetching");
        let value = Arc::new(fetcher().await?);
        let superseded = slot.generation.load(Ordering::SeqCst) != generation;
        if superseded {
            debug!(%key, "invalidated during fetch, storing as stale");
        }
        self.store(key, Arc::clone(&value) as ErasedValue, superseded);
        Ok(value)
    }

    /// Seed or overwrite an entry.
    pub fn insert<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        if let Some(slot) = self.slots.get(&key) {
            slot.bump();
        }
        self.store(key, Arc::new(value), false);
    }

    /// The cached value regardless of staleness.
    pub fn peek<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entry = self.entries.get(key)?;
        Arc::clone(&entry.value).downcast::<T>().ok()
    }

    /// Whether `key` has an entry that would be served without a fetch.
    pub fn is_fresh(&self, key: &QueryKey, stale_time: Duration) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| is_fresh(&entry, stale_time))
    }

    /// Mark every entry under `prefix` stale. Returns how many matched.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        self.bump_slots(prefix);
        let mut matched = 0;
        for mut entry in self.entries.iter_mut() {
            if entry.key().starts_with(prefix) {
                entry.value_mut().invalidated = true;
                matched += 1;
            }
        }
        debug!(%prefix, matched, "invalidated cache entries");
        self.publish(CacheEvent::Invalidated {
            prefix: prefix.clone(),
            matched,
        });
        matched
    }

    /// Drop every entry under `prefix`. Returns how many were dropped.
    pub fn remove(&self, prefix: &QueryKey) -> usize {
        self.bump_slots(prefix);
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let matched = before.saturating_sub(self.entries.len());
        self.publish(CacheEvent::Removed {
            prefix: prefix.clone(),
            matched,
        });
        matched
    }

    pub fn clear(&self) {
        for slot in &self.slots {
            slot.bump();
        }
        let matched = self.entries.len();
        self.entries.clear();
        self.publish(CacheEvent::Cleared { matched });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys currently held, sorted.
    pub fn keys(&self) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = self.entries.iter().map(|r| r.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn fresh<T: Send + Sync + 'static>(&self, key: &QueryKey, stale_time: Duration) -> Option<Arc<T>> {
        let entry = self.entries.get(key)?;
        if !is_fresh(&entry, stale_time) {
            return None;
        }
        Arc::clone(&entry.value).downcast::<T>().ok()
    }

    fn slot(&self, key: &QueryKey) -> Arc<KeySlot> {
        Arc::clone(self.slots.entry(key.clone()).or_default().value())
    }

    fn bump_slots(&self, prefix: &QueryKey) {
        for slot in &self.slots {
            if slot.key().starts_with(prefix) {
                slot.bump();
            }
        }
    }

    fn store(&self, key: QueryKey, value: ErasedValue, invalidated: bool) {
        self.entries.insert(
            key.clone(),
            CacheEntry {
                value,
                fetched_at: Instant::now(),
                invalidated,
            },
        );
        self.publish(CacheEvent::Stored { key });
    }

    fn publish(&self, event: CacheEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

fn is_fresh(entry: &CacheEntry, stale_time: Duration) -> bool {
    !entry.invalidated && entry.fetched_at.elapsed() < stale_time
}
