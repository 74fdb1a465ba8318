//! Search and recommendation orchestration: fetch, filter, merge, dedup,
//! rank.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info};

use crate::cache::{CacheKey, NoticeCache};
use crate::fetcher::MultiSourceFetcher;
use crate::filter;
use crate::rules::{FilterMode, CATEGORY_KEYWORDS};
use crate::types::Notice;

/// Row counts mirror the two product surfaces: search pulls one page of
/// 100, the recommendation feed digs deeper per category.
const SEARCH_ROWS: u32 = 100;
const RECOMMEND_ROWS: u32 = 200;

pub struct NoticeAggregator {
    fetcher: MultiSourceFetcher,
    cache: Arc<dyn NoticeCache>,
    curated: Vec<Notice>,
}

impl NoticeAggregator {
    pub fn new(
        fetcher: MultiSourceFetcher,
        cache: Arc<dyn NoticeCache>,
        curated: Vec<Notice>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            curated,
        }
    }

    /// Free-text search: loose filtering with the visitor's query as the
    /// relevance keyword, curated records matching the query merged behind
    /// the API results. No fee range applies here.
    pub async fn search_notices(&self, keyword: &str) -> Vec<Notice> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Vec::new();
        }

        let mut notices = self
            .fetch_filtered(keyword, SEARCH_ROWS, FilterMode::Loose)
            .await;

        let mut seen: HashSet<(String, String)> =
            notices.iter().map(Notice::dedup_key).collect();
        for curated in &self.curated {
            if !curated.title.contains(keyword) && !curated.agency.contains(keyword) {
                continue;
            }
            if seen.insert(curated.dedup_key()) {
                notices.push(curated.clone());
            }
        }

        sort_newest_first(&mut notices);
        info!(keyword, count = notices.len(), "search complete");
        notices
    }

    /// The fixed recommendation feed: every category keyword in strict
    /// mode, fetched concurrently but merged in the fixed keyword order so
    /// the first-seen `(title, agency)` tie-break stays deterministic.
    /// Curated records come last under the same dedup and fee-range rules.
    pub async fn recommend_notices(&self, min_fee: i64, max_fee: i64) -> Vec<Notice> {
        let fetches = CATEGORY_KEYWORDS
            .iter()
            .map(|keyword| self.fetch_filtered(keyword, RECOMMEND_ROWS, FilterMode::Strict));
        let per_keyword = join_all(fetches).await;

        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut merged = Vec::new();
        for notices in per_keyword {
            for notice in notices {
                // The key is claimed even by out-of-range notices: a later
                // keyword's copy of the same announcement must not slip in
                // with different field values.
                if !seen.insert(notice.dedup_key()) {
                    continue;
                }
                if notice.fee < min_fee || notice.fee > max_fee {
                    continue;
                }
                merged.push(notice);
            }
        }

        for curated in &self.curated {
            if seen.contains(&curated.dedup_key()) {
                continue;
            }
            if curated.fee < min_fee || curated.fee > max_fee {
                continue;
            }
            seen.insert(curated.dedup_key());
            merged.push(curated.clone());
        }

        sort_newest_first(&mut merged);
        info!(min_fee, max_fee, count = merged.len(), "recommendation feed built");
        merged
    }

    async fn fetch_filtered(&self, keyword: &str, rows: u32, mode: FilterMode) -> Vec<Notice> {
        let key = CacheKey {
            keyword: keyword.to_string(),
            rows,
            mode,
            lookback_days: self.fetcher.lookback_days(),
        };
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let records = self.fetcher.fetch_keyword(keyword, rows).await;
        let notices = filter::filter_batch(&records, keyword, mode);
        debug!(keyword, raw = records.len(), kept = notices.len(), "fetched keyword batch");

        self.cache.put(key, notices.clone());
        notices
    }
}

/// Newest first; undated notices sink to the end. The sort is stable, so
/// same-day notices keep their merge order (API before curated).
fn sort_newest_first(notices: &mut [Notice]) {
    notices.sort_by(|a, b| b.sort_date().cmp(a.sort_date()));
}
