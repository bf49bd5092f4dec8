//! Cache invalidation sink and an in-memory read-through cache.
//!
//! The orchestrator fires invalidations after every mutation and treats
//! failures as best-effort: a missed invalidation self-heals once the TTL
//! expires, so the maximum staleness is bounded by the TTL.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, Result};

/// Side-effect interface the orchestrator calls after mutations.
pub trait CacheSink: Send + Sync {
    /// Drop the user's profile and achievement entries.
    fn invalidate_user(&self, user_id: &str) -> Result<(), CacheError>;

    /// Drop every ranking entry (rankings are cross-user).
    fn invalidate_ranking(&self) -> Result<(), CacheError>;

    /// Drop the user's progress-report entries.
    fn invalidate_progress(&self, user_id: &str) -> Result<(), CacheError>;

    /// Everything a goal/completion mutation can have staled.
    fn invalidate_goal_caches(&self, user_id: &str) -> Result<(), CacheError> {
        self.invalidate_user(user_id)?;
        self.invalidate_ranking()
    }
}

/// Sink that drops all invalidations. Useful when no cache is deployed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl CacheSink for NoopCache {
    fn invalidate_user(&self, _user_id: &str) -> Result<(), CacheError> {
        Ok(())
    }

    fn invalidate_ranking(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn invalidate_progress(&self, _user_id: &str) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Process-local read-through cache with per-entry TTL.
///
/// Values are stored as JSON so heterogeneous payloads can share one map.
/// Key layout: `user:{id}`, `achievements:{id}`, `progress:{id}:{period}`,
/// `ranking:{category}`.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (Instant, serde_json::Value)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch `key` from the cache, or compute, store, and return it.
    pub fn get_or_compute<T, F>(&self, key: &str, ttl: Duration, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.get_raw(key) {
            return Ok(serde_json::from_value(value)?);
        }
        let fresh = compute()?;
        self.set_raw(key, serde_json::to_value(&fresh)?, ttl);
        Ok(fresh)
    }

    /// Remove every entry whose key starts with `prefix`.
    pub fn remove_prefix(&self, prefix: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.retain(|key, _| !key.starts_with(prefix));
        }
    }

    /// Remove a single entry.
    pub fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    /// Number of live (non-expired) entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .map(|e| e.values().filter(|(expiry, _)| *expiry > now).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_raw(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some((expiry, value)) if *expiry > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set_raw(&self, key: &str, value: serde_json::Value, ttl: Duration) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), (Instant::now() + ttl, value));
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheSink for MemoryCache {
    fn invalidate_user(&self, user_id: &str) -> Result<(), CacheError> {
        self.remove(&format!("user:{user_id}"));
        self.remove(&format!("achievements:{user_id}"));
        self.remove_prefix(&format!("progress:{user_id}:"));
        Ok(())
    }

    fn invalidate_ranking(&self) -> Result<(), CacheError> {
        self.remove_prefix("ranking:");
        Ok(())
    }

    fn invalidate_progress(&self, user_id: &str) -> Result<(), CacheError> {
        self.remove_prefix(&format!("progress:{user_id}:"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_compute_caches_value() {
        let cache = MemoryCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            let v: u32 = cache
                .get_or_compute("user:a", Duration::from_secs(60), || {
                    calls += 1;
                    Ok(42)
                })
                .unwrap();
            assert_eq!(v, 42);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_expired_entry_recomputes() {
        let cache = MemoryCache::new();
        let _: u32 = cache
            .get_or_compute("user:a", Duration::from_secs(0), || Ok(1))
            .unwrap();
        let v: u32 = cache
            .get_or_compute("user:a", Duration::from_secs(60), || Ok(2))
            .unwrap();
        assert_eq!(v, 2);
    }

    #[test]
    fn test_invalidate_user_clears_related_keys() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        let _: u32 = cache.get_or_compute("user:a", ttl, || Ok(1)).unwrap();
        let _: u32 = cache.get_or_compute("achievements:a", ttl, || Ok(1)).unwrap();
        let _: u32 = cache.get_or_compute("progress:a:7d", ttl, || Ok(1)).unwrap();
        let _: u32 = cache.get_or_compute("user:b", ttl, || Ok(1)).unwrap();

        cache.invalidate_user("a").unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_goal_caches_hits_ranking_too() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        let _: u32 = cache.get_or_compute("ranking:xp", ttl, || Ok(1)).unwrap();
        let _: u32 = cache.get_or_compute("user:a", ttl, || Ok(1)).unwrap();

        cache.invalidate_goal_caches("a").unwrap();
        assert!(cache.is_empty());
    }
}
