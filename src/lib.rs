pub mod aggregator;
pub mod cache;
pub mod config;
pub mod curated;
pub mod digest;
pub mod fetcher;
pub mod filter;
pub mod mailer;
pub mod normalizer;
pub mod parser;
pub mod pricing;
pub mod record;
pub mod rules;
pub mod store;
pub mod traits;
pub mod types;

pub use aggregator::NoticeAggregator;
pub use cache::{CacheKey, NoopCache, NoticeCache, TtlCache};
pub use config::AppConfig;
pub use fetcher::{HttpEndpoint, MultiSourceFetcher};
pub use mailer::{MailConfig, Mailer};
pub use pricing::compute_quote;
pub use record::RawRecord;
pub use rules::FilterMode;
pub use store::SiteStore;
pub use traits::{BidSource, QueryWindow};
pub use types::*;
