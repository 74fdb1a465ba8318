//! Multi-source fetch fan-out over the known bid-announcement endpoints.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::parser;
use crate::record::RawRecord;
use crate::traits::{BidSource, QueryWindow};
use crate::types::{FetchConfig, NoticeError, Result};

/// The four live endpoint generations: new/legacy gateway paths, each with
/// a procurement-service search and a self-managed-agency search. They
/// return overlapping notices; downstream dedup handles that.
const ENDPOINTS: [(&str, &str); 4] = [
    (
        "new-pps",
        "https://apis.data.go.kr/1230000/ad/BidPublicInfoService/getBidPblancListInfoServcPPSSrch",
    ),
    (
        "new-orgn",
        "https://apis.data.go.kr/1230000/ad/BidPublicInfoService/getBidPblancListInfoServcOrgnSearch",
    ),
    (
        "legacy-pps",
        "https://apis.data.go.kr/1230000/BidPublicInfoService04/getBidPblancListInfoServcPPSSrch",
    ),
    (
        "legacy-orgn",
        "https://apis.data.go.kr/1230000/BidPublicInfoService04/getBidPblancListInfoServcOrgnSearch",
    ),
];

/// One real HTTP endpoint of the bid-announcement API.
pub struct HttpEndpoint {
    client: Client,
    label: String,
    base_url: String,
    service_key: String,
}

impl HttpEndpoint {
    pub fn new(client: Client, label: &str, base_url: &str, service_key: &str) -> Self {
        Self {
            client,
            label: label.to_string(),
            base_url: base_url.to_string(),
            service_key: service_key.to_string(),
        }
    }

    /// The portal hands out service keys either pre-encoded or raw; a key
    /// already containing '%' must pass through untouched or the gateway
    /// rejects it as double-encoded.
    fn keyed_url(&self) -> String {
        let key: String = if self.service_key.contains('%') {
            self.service_key.clone()
        } else {
            form_urlencoded::byte_serialize(self.service_key.as_bytes()).collect()
        };
        format!("{}?serviceKey={}", self.base_url, key)
    }
}

#[async_trait]
impl BidSource for HttpEndpoint {
    fn source_name(&self) -> String {
        self.label.clone()
    }

    async fn query(&self, keyword: &str, rows: u32, window: &QueryWindow) -> Result<Vec<RawRecord>> {
        // The upstream exposes two distinct title-search parameter names
        // across generations; sending the keyword under both covers all four
        // endpoints with one parameter set.
        let response = self
            .client
            .get(self.keyed_url())
            .query(&[
                ("numOfRows", rows.to_string()),
                ("pageNo", "1".to_string()),
                ("type", "json".to_string()),
                ("inqryDiv", "1".to_string()),
                ("inqryBgnDt", window.begin.clone()),
                ("inqryEndDt", window.end.clone()),
                ("bidNm", keyword.to_string()),
                ("bidNtceNm", keyword.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NoticeError::UpstreamStatus {
                source: self.label.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(parser::parse_items(&body))
    }
}

/// Fans one keyword query out across every configured source concurrently
/// and concatenates whatever comes back.
pub struct MultiSourceFetcher {
    sources: Vec<Arc<dyn BidSource>>,
    lookback_days: i64,
}

impl MultiSourceFetcher {
    /// The production source set: all four HTTP endpoints sharing one
    /// client. An empty service key configures no sources at all, so every
    /// fetch legitimately returns nothing.
    pub fn from_config(config: &FetchConfig, service_key: &str) -> Self {
        let service_key = service_key.trim();
        if service_key.is_empty() {
            warn!("no bid API service key configured; fetches will return nothing");
            return Self::new(Vec::new(), config.lookback_days);
        }

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        let sources = ENDPOINTS
            .iter()
            .map(|(label, base_url)| {
                Arc::new(HttpEndpoint::new(client.clone(), label, base_url, service_key))
                    as Arc<dyn BidSource>
            })
            .collect();

        Self::new(sources, config.lookback_days)
    }

    pub fn new(sources: Vec<Arc<dyn BidSource>>, lookback_days: i64) -> Self {
        Self {
            sources,
            lookback_days,
        }
    }

    pub fn lookback_days(&self) -> i64 {
        self.lookback_days
    }

    /// Query every source for one keyword. Sources run concurrently, so the
    /// call lasts at most one endpoint timeout, and a failing source only
    /// costs its own contribution.
    pub async fn fetch_keyword(&self, keyword: &str, rows: u32) -> Vec<RawRecord> {
        let window = QueryWindow::last_days(self.lookback_days);

        let calls = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            let window = window.clone();
            async move {
                let name = source.source_name();
                (name, source.query(keyword, rows, &window).await)
            }
        });

        let mut records = Vec::new();
        for (name, outcome) in join_all(calls).await {
            match outcome {
                Ok(batch) => {
                    debug!(source = %name, count = batch.len(), keyword, "endpoint answered");
                    records.extend(batch);
                }
                Err(e) => {
                    // One endpoint failing must never abort the others.
                    warn!(source = %name, keyword, "endpoint failed: {}", e);
                }
            }
        }
        records
    }
}
