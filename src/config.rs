//! Environment-driven configuration, read once at startup.

use std::env;

use tracing::warn;

use crate::mailer::MailConfig;
use crate::types::FetchConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Public-data-portal service key for the bid-announcement API. May be
    /// handed out pre-encoded; the fetcher copes with either form.
    pub service_key: String,
    pub database_url: String,
    pub fetch: FetchConfig,
    /// Present only when every SMTP variable is set; digests fall back to
    /// dry-run output without it.
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let service_key = env::var("BID_API_KEY").unwrap_or_default();
        if service_key.trim().is_empty() {
            warn!("BID_API_KEY is not set; upstream queries will be skipped");
        }

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:winnersketch.db?mode=rwc".to_string());

        let mut fetch = FetchConfig::default();
        if let Some(days) = env_parse("LOOKBACK_DAYS") {
            fetch.lookback_days = days;
        }
        if let Some(seconds) = env_parse("CACHE_TTL_SECONDS") {
            fetch.cache_ttl_seconds = seconds;
        }

        Self {
            service_key,
            database_url,
            fetch,
            mail: mail_from_env(),
        }
    }
}

fn mail_from_env() -> Option<MailConfig> {
    let smtp_host = env::var("SMTP_HOST").ok()?;
    let smtp_username = env::var("SMTP_USERNAME").ok()?;
    let smtp_password = env::var("SMTP_PASSWORD").ok()?;
    let from_address = env::var("MAIL_FROM").ok()?;
    let studio_address = env::var("STUDIO_EMAIL").ok()?;

    Some(MailConfig {
        smtp_host,
        smtp_username,
        smtp_password,
        from_address,
        studio_address,
    })
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.parse().ok()
}
