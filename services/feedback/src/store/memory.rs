//! In-memory implementation of the feedback store.
//!
//! # Purpose
//! Keeps every record in a `Vec` guarded by `tokio::sync::RwLock`. Used for
//! local development, tests, and deployments where durability is not needed.
//!
//! # Durability and consistency
//! - **Not durable**: all records are lost on process restart.
//! - Inserts take the write lock, so each insert is atomic and readers never
//!   observe a partially written record.
//!
//! # Performance characteristics
//! Aggregations scan every record on each call, the same cost profile as the
//! Postgres backend without indexes. Fine for a single-tenant feedback tool.
use super::{FeedbackStore, StoreConfig, StoreError, StoreResult};
use crate::model::{FeedbackRecord, KeywordCount, NewFeedback, SentimentCounts, UNKNOWN_EMOTION};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryStore {
    config: StoreConfig,
    /// Records in insertion order.
    records: Arc<RwLock<Vec<FeedbackRecord>>>,
    closed: AtomicBool,
}

impl InMemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            records: Arc::new(RwLock::new(Vec::new())),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for InMemoryStore {
    async fn insert(&self, feedback: NewFeedback) -> StoreResult<FeedbackRecord> {
        self.ensure_open()?;
        let record = feedback.into_record(Uuid::new_v4());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn sentiment_counts(&self) -> StoreResult<SentimentCounts> {
        self.ensure_open()?;
        let mut counts = SentimentCounts::default();
        for record in self.records.read().await.iter() {
            counts.add(record.sentiment_label, 1);
        }
        Ok(counts)
    }

    async fn emotion_counts(&self) -> StoreResult<BTreeMap<String, u64>> {
        self.ensure_open()?;
        let mut counts = BTreeMap::new();
        for record in self.records.read().await.iter() {
            let emotion = if record.emotion.is_empty() {
                UNKNOWN_EMOTION
            } else {
                record.emotion.as_str()
            };
            *counts.entry(emotion.to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn top_keywords(&self, limit: usize) -> StoreResult<Vec<KeywordCount>> {
        self.ensure_open()?;
        let records = self.records.read().await;
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for keyword in records.iter().flat_map(|record| record.keywords.iter()) {
            *counts.entry(keyword.as_str()).or_insert(0) += 1;
        }
        let mut items: Vec<KeywordCount> = counts
            .into_iter()
            .map(|(keyword, count)| KeywordCount {
                keyword: keyword.to_string(),
                count,
            })
            .collect();
        items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
        items.truncate(limit);
        Ok(items)
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<FeedbackRecord>> {
        self.ensure_open()?;
        let records = self.records.read().await;
        // Walk newest-inserted first so the stable sort keeps that order on ties.
        let mut items: Vec<&FeedbackRecord> = records.iter().rev().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items.into_iter().take(limit).cloned().collect())
    }

    async fn count(&self) -> StoreResult<u64> {
        self.ensure_open()?;
        Ok(self.records.read().await.len() as u64)
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    fn collection(&self) -> &str {
        &self.config.collection
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use feedback_analyzer::SentimentLabel;

    fn store() -> InMemoryStore {
        InMemoryStore::new(StoreConfig {
            collection: "feedbacks".to_string(),
        })
    }

    fn feedback(
        label: SentimentLabel,
        emotion: &str,
        keywords: &[&str],
        offset_secs: i64,
    ) -> NewFeedback {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        NewFeedback {
            name: "Al".to_string(),
            email: "a@x.com".to_string(),
            feedback: "text".to_string(),
            rating: 3,
            sentiment_score: 0.0,
            sentiment_label: label,
            emotion: emotion.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            created_at: base + Duration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn insert_assigns_identity_and_counts() {
        let store = store();
        let a = store
            .insert(feedback(SentimentLabel::Positive, "joy", &[], 0))
            .await
            .unwrap();
        let b = store
            .insert(feedback(SentimentLabel::Positive, "joy", &[], 0))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn sentiment_counts_default_missing_labels_to_zero() {
        let store = store();
        store
            .insert(feedback(SentimentLabel::Negative, "anger", &[], 0))
            .await
            .unwrap();
        store
            .insert(feedback(SentimentLabel::Negative, "anger", &[], 1))
            .await
            .unwrap();
        let counts = store.sentiment_counts().await.unwrap();
        assert_eq!(
            counts,
            SentimentCounts {
                positive: 0,
                neutral: 0,
                negative: 2
            }
        );
        assert_eq!(counts.total(), store.count().await.unwrap());
    }

    #[tokio::test]
    async fn empty_emotion_is_bucketed_as_unknown() {
        let store = store();
        store
            .insert(feedback(SentimentLabel::Neutral, "", &[], 0))
            .await
            .unwrap();
        store
            .insert(feedback(SentimentLabel::Neutral, "joy", &[], 0))
            .await
            .unwrap();
        let counts = store.emotion_counts().await.unwrap();
        assert_eq!(counts.get("unknown"), Some(&1));
        assert_eq!(counts.get("joy"), Some(&1));
    }

    #[tokio::test]
    async fn top_keywords_sorted_by_count_then_keyword() {
        let store = store();
        store
            .insert(feedback(SentimentLabel::Neutral, "joy", &["pricing", "support team"], 0))
            .await
            .unwrap();
        store
            .insert(feedback(SentimentLabel::Neutral, "joy", &["support team", "app"], 1))
            .await
            .unwrap();
        store
            .insert(feedback(SentimentLabel::Neutral, "joy", &["delivery"], 2))
            .await
            .unwrap();
        let top = store.top_keywords(3).await.unwrap();
        let pairs: Vec<(&str, u64)> = top.iter().map(|k| (k.keyword.as_str(), k.count)).collect();
        assert_eq!(pairs, [("support team", 2), ("app", 1), ("delivery", 1)]);
    }

    #[tokio::test]
    async fn recent_is_newest_first_and_limited() {
        let store = store();
        for offset in [5, 1, 9, 3] {
            store
                .insert(feedback(SentimentLabel::Neutral, "joy", &[], offset))
                .await
                .unwrap();
        }
        let recent = store.recent(3).await.unwrap();
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let offsets: Vec<i64> = recent
            .iter()
            .map(|r| (r.created_at - base).num_seconds())
            .collect();
        assert_eq!(offsets, [9, 5, 3]);
    }

    #[tokio::test]
    async fn recent_ties_list_latest_insert_first() {
        let store = store();
        let first = store
            .insert(feedback(SentimentLabel::Neutral, "joy", &[], 0))
            .await
            .unwrap();
        let second = store
            .insert(feedback(SentimentLabel::Neutral, "joy", &[], 0))
            .await
            .unwrap();
        let recent = store.recent(20).await.unwrap();
        assert_eq!(recent[0].id, second.id);
        assert_eq!(recent[1].id, first.id);
    }

    #[tokio::test]
    async fn closed_store_rejects_operations() {
        let store = store();
        store.health_check().await.unwrap();
        store.close().await;
        assert!(matches!(store.health_check().await, Err(StoreError::Closed)));
        assert!(matches!(
            store
                .insert(feedback(SentimentLabel::Neutral, "joy", &[], 0))
                .await,
            Err(StoreError::Closed)
        ));
    }

    #[test]
    fn backend_identity() {
        let store = store();
        assert!(!store.is_durable());
        assert_eq!(store.backend_name(), "memory");
        assert_eq!(store.collection(), "feedbacks");
    }
}
