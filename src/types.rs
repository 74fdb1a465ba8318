use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized design-competition procurement announcement.
///
/// Identity for cross-batch deduplication is the `(title, agency)` pair; the
/// raw source notice id only dedupes within a single fetch batch because the
/// upstream endpoint variants share an id space but curated records do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub agency: String,
    /// Published design fee in whole won. 0 means the fee was not disclosed
    /// and quote computation is disabled for this notice.
    pub fee: i64,
    /// `YYYY-MM-DD`, or `"-"` when the source date was unusable.
    pub notice_date: String,
    /// Detail page link, synthesized from the notice id when the source
    /// provided none.
    pub url: String,
    /// First 8 digits of the unformatted source date (`YYYYMMDD`), kept for
    /// day-granularity recency checks. Empty when the date was unusable.
    pub raw_date: String,
}

impl Notice {
    pub fn dedup_key(&self) -> (String, String) {
        (self.title.clone(), self.agency.clone())
    }

    /// Tiered service quote for this notice, or `None` when the fee is
    /// undisclosed.
    pub fn quote(&self) -> Option<QuoteBreakdown> {
        (self.fee > 0).then(|| crate::pricing::compute_quote(self.fee))
    }

    /// Sort key that pushes undated notices behind every dated one when
    /// ordering newest-first.
    pub fn sort_date(&self) -> &str {
        if self.notice_date == "-" {
            "0000-00-00"
        } else {
            &self.notice_date
        }
    }
}

/// Service quote derived from one published design fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Final quote after the rate ladder, minimum floor, and 10,000-won
    /// rounding.
    pub base_quote: i64,
    /// The rate actually applied, as a percentage of the fee.
    pub applied_rate_percent: f64,
    /// Which pricing rule fired, for display.
    pub note: String,
    pub plans: PlanPrices,
}

/// The three plan price points derived from one base quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPrices {
    pub basic: i64,
    pub premium: i64,
    pub express: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    Basic,
    Premium,
    Express,
}

impl Plan {
    pub fn label(&self) -> &'static str {
        match self {
            Plan::Basic => "BASIC",
            Plan::Premium => "PREMIUM",
            Plan::Express => "EXPRESS",
        }
    }
}

impl PlanPrices {
    pub fn price(&self, plan: Plan) -> i64 {
        match plan {
            Plan::Basic => self.basic,
            Plan::Premium => self.premium,
            Plan::Express => self.express,
        }
    }
}

/// A digest subscriber row. The management token is the only credential for
/// unsubscribing, so it is opaque and never reused across emails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    pub min_fee: i64,
    pub max_fee: i64,
    pub manage_token: String,
    pub consented: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Rolling lookback window for the inquiry date range.
    pub lookback_days: i64,
    pub cache_ttl_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            // Generic browser string; the upstream gateway blocks obvious bots.
            user_agent: "Mozilla/5.0".to_string(),
            timeout_seconds: 20,
            lookback_days: 30,
            cache_ttl_seconds: 300,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NoticeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream {source} returned status {status}")]
    UpstreamStatus { source: String, status: u16 },

    #[error("response parse error: {0}")]
    Parse(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("email build error: {0}")]
    Mail(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("email address error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("no subscriber for token {token}")]
    SubscriberNotFound { token: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, NoticeError>;
