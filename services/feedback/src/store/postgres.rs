//! Postgres-backed implementation of the feedback store.
//!
//! # What this module is
//! Implements [`FeedbackStore`] on Postgres (via `sqlx`). Every submission is
//! one row in `feedback_documents`; the configured collection name is stored
//! as a column so several logical collections can share one database.
//!
//! # Key invariants
//! - Rows are insert-only; nothing in the service updates or deletes them.
//! - `id` is generated here, `seq` by Postgres; `seq` breaks ties between
//!   equal `created_at` values in recency listings.
//! - Aggregations run as single SQL statements (`GROUP BY`, `unnest`,
//!   `ORDER BY`, `LIMIT`), so each view is consistent within one query.
//!
//! # Security notes
//! - Database URLs may contain credentials; never log them.
//! - All SQL is static; the collection name is always a bound parameter.
//!
//! # Operational notes
//! - Migrations run at connect time via `sqlx::migrate!("./migrations")` so
//!   handlers can assume the schema exists.
//! - Pool timeouts are explicit; a dead database fails requests instead of
//!   hanging them.
use super::{FeedbackStore, StoreConfig, StoreError, StoreResult};
use crate::config::PostgresConfig;
use crate::model::{FeedbackRecord, KeywordCount, NewFeedback, SentimentCounts};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feedback_analyzer::SentimentLabel;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Durable feedback store backed by Postgres.
///
/// # Example
/// ```rust,no_run
/// use feedback::config::PostgresConfig;
/// use feedback::store::{StoreConfig, postgres::PostgresStore};
///
/// async fn open(pg: PostgresConfig, cfg: StoreConfig) {
///     let _ = PostgresStore::connect(&pg, cfg).await;
/// }
/// ```
pub struct PostgresStore {
    pool: PgPool,
    config: StoreConfig,
}

/// Row shape for `feedback_documents`, kept apart from the API model so label
/// parsing happens in one place.
#[derive(Debug, Clone, FromRow)]
struct DbFeedback {
    id: Uuid,
    name: String,
    email: String,
    feedback: String,
    rating: i64,
    sentiment_score: f64,
    sentiment_label: String,
    emotion: String,
    keywords: Vec<String>,
    created_at: DateTime<Utc>,
}

const RECORD_COLUMNS: &str = "id, name, email, feedback, rating, sentiment_score, \
     sentiment_label, emotion, keywords, created_at";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unexpected(anyhow::Error::new(err))
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Unexpected(anyhow::Error::new(err))
    }
}

impl PostgresStore {
    /// Connect, apply migrations, and return a ready store.
    ///
    /// # Errors
    /// - Invalid URL, unreachable database, connect timeout, or migration failure.
    pub async fn connect(pg: &PostgresConfig, config: StoreConfig) -> StoreResult<Self> {
        let connect_options = PgConnectOptions::from_str(&pg.url)?;
        let connect = PgPoolOptions::new()
            .max_connections(pg.max_connections)
            .acquire_timeout(Duration::from_millis(pg.acquire_timeout_ms))
            .connect_with(connect_options);
        let pool = tokio::time::timeout(Duration::from_millis(pg.connect_timeout_ms), connect)
            .await
            .map_err(|_| anyhow!("postgres connect timed out"))??;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(collection = %config.collection, "postgres feedback store ready");
        Ok(Self { pool, config })
    }
}

#[async_trait]
impl FeedbackStore for PostgresStore {
    async fn insert(&self, feedback: NewFeedback) -> StoreResult<FeedbackRecord> {
        let sql = format!(
            "INSERT INTO feedback_documents \
             (id, collection, name, email, feedback, rating, sentiment_score, \
              sentiment_label, emotion, keywords, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {RECORD_COLUMNS}"
        );
        let row = sqlx::query_as::<_, DbFeedback>(&sql)
            .bind(Uuid::new_v4())
            .bind(&self.config.collection)
            .bind(&feedback.name)
            .bind(&feedback.email)
            .bind(&feedback.feedback)
            .bind(feedback.rating)
            .bind(feedback.sentiment_score)
            .bind(feedback.sentiment_label.as_str())
            .bind(&feedback.emotion)
            .bind(&feedback.keywords)
            .bind(feedback.created_at)
            .fetch_one(&self.pool)
            .await?;
        metrics::counter!("feedback_documents_inserted_total").increment(1);
        record_from_db(row)
    }

    async fn sentiment_counts(&self) -> StoreResult<SentimentCounts> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT sentiment_label, COUNT(*) FROM feedback_documents \
             WHERE collection = $1 GROUP BY sentiment_label",
        )
        .bind(&self.config.collection)
        .fetch_all(&self.pool)
        .await?;
        let mut counts = SentimentCounts::default();
        for (label, count) in rows {
            counts.add(parse_label(&label)?, count as u64);
        }
        Ok(counts)
    }

    async fn emotion_counts(&self) -> StoreResult<BTreeMap<String, u64>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT COALESCE(NULLIF(emotion, ''), 'unknown') AS bucket, COUNT(*) \
             FROM feedback_documents WHERE collection = $1 GROUP BY bucket",
        )
        .bind(&self.config.collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(emotion, count)| (emotion, count as u64))
            .collect())
    }

    async fn top_keywords(&self, limit: usize) -> StoreResult<Vec<KeywordCount>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT keyword, COUNT(*) AS total \
             FROM feedback_documents, unnest(keywords) AS kw(keyword) \
             WHERE collection = $1 \
             GROUP BY keyword \
             ORDER BY total DESC, keyword COLLATE \"C\" ASC \
             LIMIT $2",
        )
        .bind(&self.config.collection)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(keyword, count)| KeywordCount {
                keyword,
                count: count as u64,
            })
            .collect())
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<FeedbackRecord>> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM feedback_documents \
             WHERE collection = $1 \
             ORDER BY created_at DESC, seq DESC \
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, DbFeedback>(&sql)
            .bind(&self.config.collection)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(record_from_db).collect()
    }

    async fn count(&self) -> StoreResult<u64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM feedback_documents WHERE collection = $1")
                .bind(&self.config.collection)
                .fetch_one(&self.pool)
                .await?;
        Ok(total as u64)
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn collection(&self) -> &str {
        &self.config.collection
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

fn parse_label(value: &str) -> StoreResult<SentimentLabel> {
    value
        .parse()
        .map_err(|err| StoreError::Unexpected(anyhow::Error::new(err)))
}

fn record_from_db(row: DbFeedback) -> StoreResult<FeedbackRecord> {
    Ok(FeedbackRecord {
        id: row.id,
        name: row.name,
        email: row.email,
        feedback: row.feedback,
        rating: row.rating,
        sentiment_score: row.sentiment_score,
        sentiment_label: parse_label(&row.sentiment_label)?,
        emotion: row.emotion,
        keywords: row.keywords,
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_row(label: &str) -> DbFeedback {
        DbFeedback {
            id: Uuid::new_v4(),
            name: "Al".to_string(),
            email: "a@x.com".to_string(),
            feedback: "fine".to_string(),
            rating: 4,
            sentiment_score: 0.42,
            sentiment_label: label.to_string(),
            emotion: "joy".to_string(),
            keywords: vec!["fine".to_string()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn record_from_db_parses_label() {
        let record = record_from_db(db_row("positive")).expect("record");
        assert_eq!(record.sentiment_label, SentimentLabel::Positive);
        assert_eq!(record.rating, 4);
    }

    #[test]
    fn record_from_db_rejects_unknown_label() {
        let err = record_from_db(db_row("ecstatic")).expect_err("bad label");
        assert!(err.to_string().contains("ecstatic"));
    }

    #[tokio::test]
    async fn connect_rejects_invalid_url() {
        let pg = PostgresConfig {
            url: "not a url".to_string(),
            max_connections: 1,
            connect_timeout_ms: 200,
            acquire_timeout_ms: 200,
        };
        let result = PostgresStore::connect(
            &pg,
            StoreConfig {
                collection: "feedbacks".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(StoreError::Unexpected(_))));
    }
}
