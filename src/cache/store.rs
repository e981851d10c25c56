// Cache store abstraction and the in-memory backend.
// Entries carry an absolute expiry; reads past it behave as misses.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{GhReposError, Result};
use crate::github::FetchResult;

use super::clock::{Clock, SystemClock};

/// How long a repository listing (or a failure) stays cached: 6 hours.
pub const REPO_CACHE_TTL: Duration = Duration::from_secs(21_600);

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached data.
    pub value: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
    /// First instant at which the entry is no longer served.
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, now: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value,
            cached_at: now,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Time-bounded key/value storage for fetch results.
///
/// `set` is last-writer-wins and restarts the TTL. `invalidate` drops the entry
/// regardless of remaining lifetime.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<FetchResult>>;

    fn set(&self, key: &str, value: &FetchResult, ttl: Duration) -> Result<()>;

    fn invalidate(&self, key: &str) -> Result<()>;
}

/// Process-wide cache held in memory.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry<FetchResult>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = self.clock.now();
        let mut entries = self
            .entries
            .write()
            .map_err(|_| GhReposError::LockPoisoned)?;

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        Ok(before - entries.len())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<FetchResult>> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().map_err(|_| GhReposError::LockPoisoned)?;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired_at(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Lazy eviction; re-check in case a writer refreshed it in between.
        let mut entries = self
            .entries
            .write()
            .map_err(|_| GhReposError::LockPoisoned)?;
        if entries.get(key).is_some_and(|e| e.is_expired_at(now)) {
            trace!(key, "evicting expired cache entry");
            entries.remove(key);
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &FetchResult, ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(value.clone(), self.clock.now(), ttl);
        self.entries
            .write()
            .map_err(|_| GhReposError::LockPoisoned)?
            .insert(key.to_string(), entry);
        Ok(())
    }

    fn invalidate(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| GhReposError::LockPoisoned)?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::github::{FetchFailure, Repository};
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn sample() -> FetchResult {
        FetchResult::Success(vec![Repository {
            name: "Hello-World".to_string(),
            html_url: "https://github.com/octocat/Hello-World".to_string(),
        }])
    }

    #[test]
    fn test_entry_expires_exactly_at_ttl() {
        let entry = CacheEntry::new("test", start(), Duration::from_secs(60));

        assert!(!entry.is_expired_at(start()));
        assert!(!entry.is_expired_at(start() + chrono::Duration::seconds(59)));
        assert!(entry.is_expired_at(start() + chrono::Duration::seconds(60)));
        assert!(entry.is_expired_at(start() + chrono::Duration::seconds(61)));
    }

    #[test]
    fn test_get_within_ttl() {
        let clock = Arc::new(ManualClock::new(start()));
        let cache = MemoryCache::with_clock(clock.clone());

        cache.set("octocat", &sample(), REPO_CACHE_TTL).unwrap();
        clock.advance(chrono::Duration::seconds(21_599));

        assert_eq!(cache.get("octocat").unwrap(), Some(sample()));
    }

    #[test]
    fn test_get_at_ttl_boundary_is_miss() {
        let clock = Arc::new(ManualClock::new(start()));
        let cache = MemoryCache::with_clock(clock.clone());

        cache.set("octocat", &sample(), REPO_CACHE_TTL).unwrap();
        clock.advance(chrono::Duration::seconds(21_600));

        assert_eq!(cache.get("octocat").unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_overwrites_and_resets_ttl() {
        let clock = Arc::new(ManualClock::new(start()));
        let cache = MemoryCache::with_clock(clock.clone());
        let failure = FetchResult::Failure(FetchFailure::Transport {
            reason: "timed out".to_string(),
        });

        cache.set("octocat", &sample(), Duration::from_secs(100)).unwrap();
        clock.advance(chrono::Duration::seconds(90));
        cache.set("octocat", &failure, Duration::from_secs(100)).unwrap();
        clock.advance(chrono::Duration::seconds(90));

        assert_eq!(cache.get("octocat").unwrap(), Some(failure));
    }

    #[test]
    fn test_invalidate_removes_live_entry() {
        let cache = MemoryCache::new();

        cache.set("octocat", &sample(), REPO_CACHE_TTL).unwrap();
        cache.invalidate("octocat").unwrap();

        assert_eq!(cache.get("octocat").unwrap(), None);
        // Invalidating a missing key is a no-op.
        cache.invalidate("nobody").unwrap();
    }

    #[test]
    fn test_purge_expired() {
        let clock = Arc::new(ManualClock::new(start()));
        let cache = MemoryCache::with_clock(clock.clone());

        cache.set("short", &sample(), Duration::from_secs(10)).unwrap();
        cache.set("long", &sample(), Duration::from_secs(1000)).unwrap();
        clock.advance(chrono::Duration::seconds(10));

        assert_eq!(cache.purge_expired().unwrap(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("long").unwrap().is_some());
    }
}
