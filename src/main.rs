use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use winnersketch::digest::{self, format_currency};
use winnersketch::{
    compute_quote, AppConfig, Mailer, MultiSourceFetcher, Notice, NoticeAggregator, SiteStore,
    TtlCache,
};

#[derive(Parser)]
#[command(
    name = "winnersketch",
    about = "Bid-notice sourcing and quote engine for an architectural visualization studio"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Free-text search over recent bid announcements.
    Search { keyword: String },
    /// The fixed-category recommendation feed, filtered by fee range.
    Recommend {
        #[arg(long, default_value_t = 0)]
        min: i64,
        #[arg(long, default_value_t = 999_999_999_999)]
        max: i64,
    },
    /// Price one disclosed design fee.
    Quote { fee: i64 },
    /// Build (and optionally send) the daily subscriber digest.
    Digest {
        #[arg(long)]
        dry_run: bool,
        /// Recency window in days for "new" notices.
        #[arg(long, default_value_t = 1)]
        days: i64,
    },
    /// Subscribe an email address to the daily digest.
    Subscribe {
        email: String,
        #[arg(long, default_value_t = 0)]
        min: i64,
        #[arg(long, default_value_t = 999_999_999_999)]
        max: i64,
    },
    /// Withdraw a subscription using its management token.
    Unsubscribe { token: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Command::Search { keyword } => {
            let store = SiteStore::connect(&config.database_url).await?;
            let aggregator = build_aggregator(&config, &store).await?;
            let notices = aggregator.search_notices(&keyword).await;
            print_notices(&notices);
        }
        Command::Recommend { min, max } => {
            let store = SiteStore::connect(&config.database_url).await?;
            let aggregator = build_aggregator(&config, &store).await?;
            let notices = aggregator.recommend_notices(min, max).await;
            print_notices(&notices);
        }
        Command::Quote { fee } => {
            if fee <= 0 {
                println!("설계비가 공개되지 않은 공고는 견적을 계산할 수 없습니다.");
                return Ok(());
            }
            let breakdown = compute_quote(fee);
            println!("설계비 {}원 기준 견적", format_currency(fee));
            println!("  적용 요율: {}% ({})", breakdown.rate_display(), breakdown.note);
            println!("  기준 견적가: {}원", format_currency(breakdown.base_quote));
            println!("  BASIC:   {}원", format_currency(breakdown.plans.basic));
            println!("  PREMIUM: {}원", format_currency(breakdown.plans.premium));
            println!("  EXPRESS: {}원", format_currency(breakdown.plans.express));
        }
        Command::Digest { dry_run, days } => {
            run_digest(&config, dry_run, days).await?;
        }
        Command::Subscribe { email, min, max } => {
            let store = SiteStore::connect(&config.database_url).await?;
            let subscriber = store.upsert_subscriber(&email, min, max).await?;
            println!(
                "구독 완료: {} ({}원 ~ {}원)",
                subscriber.email,
                format_currency(subscriber.min_fee),
                format_currency(subscriber.max_fee)
            );
            println!("관리 토큰: {}", subscriber.manage_token);
        }
        Command::Unsubscribe { token } => {
            let store = SiteStore::connect(&config.database_url).await?;
            store.unsubscribe(&token).await?;
            println!("구독이 해지되었습니다.");
        }
    }

    Ok(())
}

async fn build_aggregator(config: &AppConfig, store: &SiteStore) -> anyhow::Result<NoticeAggregator> {
    store.seed_curated().await?;
    let curated = store.curated_notices().await?;

    let fetcher = MultiSourceFetcher::from_config(&config.fetch, &config.service_key);
    let cache = Arc::new(TtlCache::new(Duration::from_secs(
        config.fetch.cache_ttl_seconds,
    )));

    Ok(NoticeAggregator::new(fetcher, cache, curated))
}

async fn run_digest(config: &AppConfig, dry_run: bool, days: i64) -> anyhow::Result<()> {
    let store = SiteStore::connect(&config.database_url).await?;
    let aggregator = build_aggregator(config, &store).await?;
    let all = aggregator.recommend_notices(0, i64::MAX).await;
    let today = Local::now().date_naive();
    let recent = digest::recent_notices(&all, days, today);
    info!(total = all.len(), recent = recent.len(), "digest pool ready");

    let mailer = match (&config.mail, dry_run) {
        (Some(mail_config), false) => Some(Mailer::new(mail_config)?),
        (None, false) => {
            warn!("no SMTP configuration; falling back to dry-run output");
            None
        }
        _ => None,
    };

    for subscriber in store.consenting_subscribers().await? {
        let matched = digest::notices_for_subscriber(&recent, &subscriber);
        if matched.is_empty() {
            info!(email = %subscriber.email, "nothing new for subscriber");
            continue;
        }

        let subject = digest::digest_subject(today, matched.len());
        let body = digest::render_digest(&subscriber, &matched);
        match &mailer {
            Some(mailer) => mailer.send_digest(&subscriber.email, &subject, &body)?,
            None => {
                println!("--- {} ---", subscriber.email);
                println!("{}", subject);
                println!("{}", body);
            }
        }
    }

    Ok(())
}

fn print_notices(notices: &[Notice]) {
    if notices.is_empty() {
        println!("조건에 맞는 공고가 없습니다.");
        return;
    }
    for notice in notices {
        println!("{} | {}", notice.notice_date, notice.title);
        println!("  발주기관: {}", notice.agency);
        match notice.quote() {
            Some(breakdown) => println!(
                "  설계비: {}원 / 예상 견적가: {}원",
                format_currency(notice.fee),
                format_currency(breakdown.base_quote)
            ),
            None => println!("  설계비: 미공개"),
        }
        if !notice.url.is_empty() {
            println!("  상세: {}", notice.url);
        }
        println!();
    }
}
