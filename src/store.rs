//! SQLite persistence for the two tables the site owns: digest subscribers
//! and manually curated notices.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::curated;
use crate::types::{Notice, NoticeError, Result, Subscriber};

pub struct SiteStore {
    db: SqlitePool,
}

impl SiteStore {
    /// Connect and create the schema when missing. A single connection is
    /// enough here: SQLite serializes writers anyway, and it keeps
    /// `sqlite::memory:` databases coherent for tests.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS subscribers (
                email TEXT PRIMARY KEY,
                min_fee INTEGER NOT NULL,
                max_fee INTEGER NOT NULL,
                manage_token TEXT NOT NULL,
                consented INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS curated_notices (
                title TEXT NOT NULL,
                agency TEXT NOT NULL,
                fee INTEGER NOT NULL,
                notice_date TEXT NOT NULL,
                url TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (title, agency)
            )
            "#,
        )
        .execute(&db)
        .await?;

        Ok(Self { db })
    }

    /// Subscribe or update an existing subscription. Re-subscribing
    /// refreshes the fee range and consent but keeps the original
    /// management token, so previously mailed unsubscribe links stay valid.
    pub async fn upsert_subscriber(
        &self,
        email: &str,
        min_fee: i64,
        max_fee: i64,
    ) -> Result<Subscriber> {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO subscribers (email, min_fee, max_fee, manage_token, consented, created_at)
            VALUES (?1, ?2, ?3, ?4, 1, ?5)
            ON CONFLICT(email) DO UPDATE SET
                min_fee = excluded.min_fee,
                max_fee = excluded.max_fee,
                consented = 1
            "#,
        )
        .bind(email)
        .bind(min_fee)
        .bind(max_fee)
        .bind(&token)
        .bind(now)
        .execute(&self.db)
        .await?;

        let row = sqlx::query("SELECT * FROM subscribers WHERE email = ?1")
            .bind(email)
            .fetch_one(&self.db)
            .await?;

        let subscriber = subscriber_from_row(&row)?;
        info!(email, min_fee, max_fee, "subscriber stored");
        Ok(subscriber)
    }

    /// Everyone who should receive the next digest.
    pub async fn consenting_subscribers(&self) -> Result<Vec<Subscriber>> {
        let rows = sqlx::query("SELECT * FROM subscribers WHERE consented = 1 ORDER BY created_at")
            .fetch_all(&self.db)
            .await?;

        rows.iter().map(subscriber_from_row).collect()
    }

    /// Withdraw consent using the management token from a digest email.
    pub async fn unsubscribe(&self, token: &str) -> Result<()> {
        let outcome = sqlx::query("UPDATE subscribers SET consented = 0 WHERE manage_token = ?1")
            .bind(token)
            .execute(&self.db)
            .await?;

        if outcome.rows_affected() == 0 {
            return Err(NoticeError::SubscriberNotFound {
                token: token.to_string(),
            });
        }
        info!("subscriber unsubscribed");
        Ok(())
    }

    pub async fn curated_notices(&self) -> Result<Vec<Notice>> {
        let rows = sqlx::query("SELECT * FROM curated_notices ORDER BY notice_date DESC")
            .fetch_all(&self.db)
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                curated::curated_notice(
                    row.get("title"),
                    row.get("agency"),
                    row.get("fee"),
                    row.get("notice_date"),
                    row.get("url"),
                )
            })
            .collect())
    }

    /// Insert the built-in seed entries on first run. Existing rows win.
    pub async fn seed_curated(&self) -> Result<usize> {
        let mut inserted = 0;
        for notice in curated::seed_notices() {
            let outcome = sqlx::query(
                r#"
                INSERT OR IGNORE INTO curated_notices (title, agency, fee, notice_date, url)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&notice.title)
            .bind(&notice.agency)
            .bind(notice.fee)
            .bind(&notice.notice_date)
            .bind(&notice.url)
            .execute(&self.db)
            .await?;
            inserted += outcome.rows_affected() as usize;
        }
        if inserted > 0 {
            debug!(inserted, "seeded curated notices");
        }
        Ok(inserted)
    }
}

fn subscriber_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Subscriber> {
    Ok(Subscriber {
        email: row.get("email"),
        min_fee: row.get("min_fee"),
        max_fee: row.get("max_fee"),
        manage_token: row.get("manage_token"),
        consented: row.get::<i64, _>("consented") != 0,
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}
