//! In-process memo of normalized query outcomes.
//!
//! Upstream providers revise their data periodically, so entries expire after
//! a fixed TTL (24 hours by default). The caller checks the cache before
//! fetching and only inserts successful outcomes; errors are never cached.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::{Normalized, Provider, SeriesQuery};

pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub provider: Provider,
    pub query: SeriesQuery,
}

impl CacheKey {
    pub fn new(provider: Provider, query: &SeriesQuery) -> Self {
        Self {
            provider,
            query: query.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    stored_at: Instant,
    value: Normalized,
}

#[derive(Debug)]
pub struct SeriesCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl Default for SeriesCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl SeriesCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fresh entry for `key` as of `now`. A stale entry is evicted.
    pub fn get(&mut self, key: &CacheKey, now: Instant) -> Option<Normalized> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) < self.ttl {
            debug!(dataset = %key.query.dataset_id, entity = %key.query.entity_id, "cache hit");
            return Some(entry.value.clone());
        }
        debug!(dataset = %key.query.dataset_id, entity = %key.query.entity_id, "cache entry expired");
        self.entries.remove(key);
        None
    }

    pub fn insert(&mut self, key: CacheKey, value: Normalized, now: Instant) {
        self.entries.insert(key, CacheEntry { stored_at: now, value });
    }

    /// Return the cached outcome, or compute, store and return a new one.
    ///
    /// If `compute` fails, nothing is stored.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: CacheKey,
        now: Instant,
        compute: impl FnOnce() -> Result<Normalized, E>,
    ) -> Result<Normalized, E> {
        if let Some(hit) = self.get(&key, now) {
            return Ok(hit);
        }
        let value = compute()?;
        self.insert(key, value.clone(), now);
        Ok(value)
    }

    /// Drop every entry that is stale as of `now`.
    pub fn purge_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.stored_at) < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmptyReason;

    fn key(entity: &str) -> CacheKey {
        CacheKey::new(Provider::Eurostat, &SeriesQuery::new("nama_10_gdp", entity, 2010, 2020))
    }

    #[test]
    fn entries_expire_after_ttl() {
        let t0 = Instant::now();
        let mut cache = SeriesCache::new(Duration::from_secs(60));
        cache.insert(key("AT"), Normalized::empty(EmptyReason::NoYearMatch), t0);

        assert!(cache.get(&key("AT"), t0 + Duration::from_secs(59)).is_some());
        assert!(cache.get(&key("AT"), t0 + Duration::from_secs(60)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn failed_compute_does_not_populate() {
        let t0 = Instant::now();
        let mut cache = SeriesCache::default();
        let result: Result<Normalized, &str> = cache.get_or_try_insert_with(key("AT"), t0, || Err("boom"));
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn hit_skips_compute() {
        let t0 = Instant::now();
        let mut cache = SeriesCache::default();
        let first: Result<_, ()> =
            cache.get_or_try_insert_with(key("AT"), t0, || Ok(Normalized::empty(EmptyReason::NoEntityMatch)));
        assert!(first.is_ok());

        let second: Result<_, ()> = cache.get_or_try_insert_with(key("AT"), t0 + Duration::from_secs(1), || {
            panic!("should have been served from cache")
        });
        assert_eq!(second, Ok(Normalized::empty(EmptyReason::NoEntityMatch)));
    }

    #[test]
    fn keys_distinguish_year_range() {
        let t0 = Instant::now();
        let mut cache = SeriesCache::default();
        cache.insert(key("AT"), Normalized::empty(EmptyReason::NoYearMatch), t0);
        let other = CacheKey::new(Provider::Eurostat, &SeriesQuery::new("nama_10_gdp", "AT", 2010, 2021));
        assert!(cache.get(&other, t0).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn purge_drops_only_stale_entries() {
        let t0 = Instant::now();
        let mut cache = SeriesCache::new(Duration::from_secs(10));
        cache.insert(key("AT"), Normalized::empty(EmptyReason::NoYearMatch), t0);
        cache.insert(key("DE"), Normalized::empty(EmptyReason::NoYearMatch), t0 + Duration::from_secs(8));
        cache.purge_expired(t0 + Duration::from_secs(12));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key("DE"), t0 + Duration::from_secs(12)).is_some());
    }
}
