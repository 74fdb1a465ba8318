//! Injected result cache for upstream queries.
//!
//! Purely a load-shedding optimization: repeated identical queries within a
//! short window skip the upstream round trips. Correctness never depends on
//! it, which is why the no-op implementation is a valid one.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::rules::FilterMode;
use crate::types::Notice;

/// One upstream query's identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub keyword: String,
    pub rows: u32,
    pub mode: FilterMode,
    pub lookback_days: i64,
}

pub trait NoticeCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Vec<Notice>>;
    fn put(&self, key: CacheKey, notices: Vec<Notice>);
}

/// Mutex-guarded map with TTL eviction on access.
pub struct TtlCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, (Instant, Vec<Notice>)>>,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl NoticeCache for TtlCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<Notice>> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        if let Some((stored_at, notices)) = entries.get(key) {
            if stored_at.elapsed() < self.ttl {
                debug!(keyword = %key.keyword, "notice cache hit");
                return Some(notices.clone());
            }
        }
        entries.remove(key);
        None
    }

    fn put(&self, key: CacheKey, notices: Vec<Notice>) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        entries.insert(key, (Instant::now(), notices));
    }
}

/// Cache that never remembers anything. Used in tests and wherever stale
/// results are unacceptable.
pub struct NoopCache;

impl NoticeCache for NoopCache {
    fn get(&self, _key: &CacheKey) -> Option<Vec<Notice>> {
        None
    }

    fn put(&self, _key: CacheKey, _notices: Vec<Notice>) {}
}
