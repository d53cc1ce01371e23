// src/cache.rs
//! Single-slot, time-bounded cache
//!
//! Each fetcher owns one [`TimedCache`]. The difficulty fetcher keys it by
//! `()`, so only age matters; the worker fetcher keys it by identifier, so a
//! request for a different worker misses even when the slot is young.
//! Callers pass `now` explicitly so expiry can be tested without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    fetched_at: Instant,
}

/// One cached value with its key and fetch time
#[derive(Debug, Clone)]
pub struct TimedCache<K, V> {
    slot: Option<Entry<K, V>>,
    ttl: Duration,
}

impl<K: PartialEq, V: Clone> TimedCache<K, V> {
    /// Creates an empty cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        TimedCache { slot: None, ttl }
    }

    /// Returns the value if it was stored under `key` less than `ttl` before `now`
    pub fn fresh(&self, key: &K, now: Instant) -> Option<V> {
        let entry = self.slot.as_ref()?;
        if entry.key != *key {
            return None;
        }
        let age = now.saturating_duration_since(entry.fetched_at);
        (age < self.ttl).then(|| entry.value.clone())
    }

    /// Returns the last stored value regardless of key or age
    pub fn latest(&self) -> Option<V> {
        self.slot.as_ref().map(|e| e.value.clone())
    }

    /// Replaces the slot
    pub fn store(&mut self, key: K, value: V, fetched_at: Instant) {
        self.slot = Some(Entry {
            key,
            value,
            fetched_at,
        });
    }
}
