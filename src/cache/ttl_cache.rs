use crate::cache::clock::{Clock, SystemClock};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Default time-to-live for cached responses
pub const DEFAULT_TTL_SECONDS: u64 = 45;

/// Default capacity
pub const DEFAULT_MAX_ITEMS: usize = 200;

// Largest TTL chrono can represent in whole seconds
const MAX_TTL_SECONDS: i64 = i64::MAX / 1000;

/// A cached value with its insertion time
#[derive(Clone, Debug)]
pub struct CacheEntry<V> {
    pub value: V,
    pub created_at: DateTime<Utc>,
    /// Insertion order, used to break ties between equal timestamps
    sequence: u64,
}

/// Cache statistics
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
    pub hit_rate: f64,
}

#[derive(Debug)]
struct Store<V> {
    entries: HashMap<String, CacheEntry<V>>,
    next_sequence: u64,
    hits: usize,
    misses: usize,
    evictions: usize,
}

/// Bounded key/value store whose entries expire a fixed time after insertion.
///
/// Expiration is lazy: a stale entry is dropped only when `get` touches its key.
/// When full, `set` evicts the entry with the oldest insertion time (not the
/// least recently read). All mutation happens under one mutex, and no lock is
/// ever held by callers across an await point.
pub struct TtlCache<V> {
    ttl: Duration,
    ttl_seconds: u64,
    max_items: usize,
    clock: Arc<dyn Clock>,
    store: Mutex<Store<V>>,
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("max_items", &self.max_items)
            .field("entries", &self.store.lock().entries.len())
            .finish()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECONDS, DEFAULT_MAX_ITEMS)
    }
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache backed by the system clock
    pub fn new(ttl_seconds: u64, max_items: usize) -> Self {
        Self::with_clock(ttl_seconds, max_items, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit clock. A capacity of zero is treated as one.
    pub fn with_clock(ttl_seconds: u64, max_items: usize, clock: Arc<dyn Clock>) -> Self {
        let seconds = i64::try_from(ttl_seconds)
            .unwrap_or(i64::MAX)
            .min(MAX_TTL_SECONDS);
        let ttl = Duration::seconds(seconds);
        Self {
            ttl,
            ttl_seconds,
            max_items: max_items.max(1),
            clock,
            store: Mutex::new(Store {
                entries: HashMap::new(),
                next_sequence: 0,
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
        }
    }

    /// Look up `key`, dropping it if it has outlived the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut store = self.store.lock();

        let expired = match store.entries.get(key) {
            None => {
                store.misses += 1;
                log::debug!("Cache miss: {}", key);
                return None;
            }
            Some(entry) => now - entry.created_at > self.ttl,
        };

        if expired {
            store.entries.remove(key);
            store.misses += 1;
            log::debug!("Cache entry expired: {}", key);
            return None;
        }

        store.hits += 1;
        log::debug!("Cache hit: {}", key);
        store.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Insert or overwrite `key`, evicting the oldest entry first if the cache is full.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = self.clock.now();
        let mut store = self.store.lock();

        if store.entries.len() >= self.max_items {
            Self::evict_oldest(&mut store);
        }

        let sequence = store.next_sequence;
        store.next_sequence += 1;
        store.entries.insert(
            key,
            CacheEntry {
                value,
                created_at: now,
                sequence,
            },
        );
    }

    fn evict_oldest(store: &mut Store<V>) {
        let oldest = store
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.created_at, entry.sequence))
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            store.entries.remove(&key);
            store.evictions += 1;
            log::debug!("Cache full, evicted oldest entry: {}", key);
        }
    }

    /// Number of stored entries, including expired ones not yet touched
    pub fn len(&self) -> usize {
        self.store.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let store = self.store.lock();
        let lookups = store.hits + store.misses;
        CacheStats {
            entries: store.entries.len(),
            hits: store.hits,
            misses: store.misses,
            evictions: store.evictions,
            hit_rate: if lookups > 0 {
                store.hits as f64 / lookups as f64
            } else {
                0.0
            },
        }
    }
}
