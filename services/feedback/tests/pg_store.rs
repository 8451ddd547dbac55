#![cfg(feature = "pg-tests")]

use chrono::{Duration, TimeZone, Utc};
use feedback::config::{self, PostgresConfig};
use feedback::model::NewFeedback;
use feedback::store::postgres::PostgresStore;
use feedback::store::{FeedbackStore, StoreConfig};
use feedback_analyzer::SentimentLabel;

fn database_url() -> Option<String> {
    match std::env::var("FEEDBACK_TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("skipping pg-tests: set FEEDBACK_TEST_DATABASE_URL or DATABASE_URL");
            None
        }
    }
}

// Each test writes to its own collection so tests never see each other's rows.
async fn pg_store() -> Option<PostgresStore> {
    let url = database_url()?;
    let pg = PostgresConfig {
        url,
        max_connections: 5,
        connect_timeout_ms: 5_000,
        acquire_timeout_ms: 5_000,
    };
    let collection = format!("test-{}", uuid::Uuid::new_v4().simple());
    match PostgresStore::connect(&pg, StoreConfig { collection }).await {
        Ok(store) => Some(store),
        Err(err) => {
            eprintln!("skipping pg-tests: connect postgres store failed: {err}");
            None
        }
    }
}

fn feedback(label: SentimentLabel, emotion: &str, keywords: &[&str], offset_secs: i64) -> NewFeedback {
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    NewFeedback {
        name: "Al".to_string(),
        email: "a@x.com".to_string(),
        feedback: "text".to_string(),
        rating: 4,
        sentiment_score: 0.25,
        sentiment_label: label,
        emotion: emotion.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        created_at: base + Duration::seconds(offset_secs),
    }
}

#[tokio::test]
async fn postgres_store_round_trip_and_aggregates() {
    let Some(store) = pg_store().await else {
        return;
    };
    assert!(store.is_durable());
    assert_eq!(store.backend_name(), "postgres");
    store.health_check().await.expect("health");

    let stored = store
        .insert(feedback(SentimentLabel::Positive, "joy", &["support team", "app"], 0))
        .await
        .expect("insert");
    assert_eq!(stored.rating, 4);
    assert_eq!(stored.keywords, ["support team", "app"]);
    store
        .insert(feedback(SentimentLabel::Negative, "", &["support team"], 1))
        .await
        .expect("insert");
    store
        .insert(feedback(SentimentLabel::Negative, "anger", &["delivery"], 2))
        .await
        .expect("insert");

    assert_eq!(store.count().await.expect("count"), 3);
    let counts = store.sentiment_counts().await.expect("counts");
    assert_eq!((counts.positive, counts.neutral, counts.negative), (1, 0, 2));

    let emotions = store.emotion_counts().await.expect("emotions");
    assert_eq!(emotions.get("unknown"), Some(&1));
    assert_eq!(emotions.get("joy"), Some(&1));
    assert_eq!(emotions.get("anger"), Some(&1));

    let top = store.top_keywords(2).await.expect("top");
    let pairs: Vec<(&str, u64)> = top.iter().map(|k| (k.keyword.as_str(), k.count)).collect();
    assert_eq!(pairs, [("support team", 2), ("app", 1)]);

    let recent = store.recent(2).await.expect("recent");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].emotion, "anger");
    assert_eq!(recent[0].created_at, stored.created_at + Duration::seconds(2));

    store.close().await;
    assert!(store.health_check().await.is_err());
}

#[tokio::test]
async fn postgres_recent_breaks_timestamp_ties_by_insert_order() {
    let Some(store) = pg_store().await else {
        return;
    };
    let first = store
        .insert(feedback(SentimentLabel::Neutral, "trust", &[], 0))
        .await
        .expect("insert");
    let second = store
        .insert(feedback(SentimentLabel::Neutral, "trust", &[], 0))
        .await
        .expect("insert");
    let recent = store.recent(20).await.expect("recent");
    assert_eq!(recent[0].id, second.id);
    assert_eq!(recent[1].id, first.id);
}

#[tokio::test]
async fn postgres_collections_are_isolated() {
    let (Some(a), Some(b)) = (pg_store().await, pg_store().await) else {
        return;
    };
    a.insert(feedback(SentimentLabel::Positive, "joy", &["pricing"], 0))
        .await
        .expect("insert");
    assert_eq!(a.count().await.expect("count"), 1);
    assert_eq!(b.count().await.expect("count"), 0);
    assert!(b.top_keywords(20).await.expect("top").is_empty());
    assert_eq!(a.collection().len(), "test-".len() + 32);
    assert!(config::DEFAULT_COLLECTION != a.collection());
}
