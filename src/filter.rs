//! Per-batch filtering: raw-id dedup plus normalization.

use std::collections::HashSet;

use tracing::debug;

use crate::normalizer;
use crate::record::RawRecord;
use crate::rules::FilterMode;
use crate::types::Notice;

/// Run one batch of raw records (typically the concatenation of every
/// endpoint's answer for a single keyword) through the normalizer.
///
/// The upstream endpoint variants overlap, so a raw notice id is only
/// allowed to produce one notice per batch. The id is marked seen at
/// acceptance time: a rejected record does not block a later variant of the
/// same announcement whose title passes the filter. Cross-batch dedup is a
/// separate concern handled by the aggregator on the `(title, agency)` key,
/// because curated records and cross-keyword results share no id space.
pub fn filter_batch(records: &[RawRecord], keyword: &str, mode: FilterMode) -> Vec<Notice> {
    let mut seen_ids: HashSet<Option<String>> = HashSet::new();
    let mut notices = Vec::new();

    for record in records {
        let id = record.text("bidNtceNo").map(str::to_string);
        if seen_ids.contains(&id) {
            continue;
        }
        if let Some(notice) = normalizer::normalize(record, keyword, mode) {
            seen_ids.insert(id);
            notices.push(notice);
        }
    }

    debug!(
        total = records.len(),
        kept = notices.len(),
        keyword,
        "filtered notice batch"
    );
    notices
}
