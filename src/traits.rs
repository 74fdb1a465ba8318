use async_trait::async_trait;
use chrono::{Duration, Local};

use crate::record::RawRecord;
use crate::types::Result;

/// One upstream bid-announcement source: a real HTTP endpoint in
/// production, a stub in tests.
#[async_trait]
pub trait BidSource: Send + Sync {
    /// Short label for logs.
    fn source_name(&self) -> String;

    /// Query this source for raw records matching the keyword within the
    /// inquiry window. A failing source returns `Err`; the fan-out layer
    /// turns that into an empty contribution without touching its siblings.
    async fn query(&self, keyword: &str, rows: u32, window: &QueryWindow) -> Result<Vec<RawRecord>>;
}

/// Inclusive inquiry date range in the upstream's `YYYYMMDDHHMM` format.
#[derive(Debug, Clone)]
pub struct QueryWindow {
    pub begin: String,
    pub end: String,
}

impl QueryWindow {
    /// Rolling window ending now, spanning the last `days` days.
    pub fn last_days(days: i64) -> Self {
        let now = Local::now();
        let begin = now - Duration::days(days);
        Self {
            begin: begin.format("%Y%m%d0000").to_string(),
            end: now.format("%Y%m%d2359").to_string(),
        }
    }
}
