//! In-memory caching layer for service verdicts.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache entry with TTL.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    is_temporary: bool,
    expires_at: Instant,
}

/// Thread-safe cache of disposable verdicts keyed by address.
#[derive(Debug, Clone)]
pub struct VerdictCache {
    cache: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl VerdictCache {
    /// Create a new cache with the given TTL in seconds. Zero disables it.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Get a cached verdict if it exists and hasn't expired.
    pub fn get(&self, email: &str) -> Option<bool> {
        let entry = *self.cache.get(email)?;
        if Instant::now() < entry.expires_at {
            return Some(entry.is_temporary);
        }
        self.cache.remove(email);
        None
    }

    /// Store a verdict.
    pub fn set(&self, email: &str, is_temporary: bool) {
        if self.ttl.is_zero() {
            return;
        }
        let entry = CacheEntry {
            is_temporary,
            expires_at: Instant::now() + self.ttl,
        };
        self.cache.insert(email.to_string(), entry);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.cache.len()
    }
}
