//! In-memory history store.

use std::sync::Arc;

use areacheck_domain::CheckRecord;
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use crate::error::StorageResult;
use crate::traits::{validate_session_id, HistoryStore};

/// In-memory implementation of [`HistoryStore`].
///
/// Histories live in a `DashMap` keyed by session id. The entry API holds
/// the key's shard write lock across get-or-create, push, and snapshot, so
/// the read-modify-write is atomic per session: two concurrent first
/// appends cannot both create a fresh history, and concurrent appends
/// cannot interleave list state. Sessions on different keys proceed in
/// parallel.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    sessions: DashMap<String, Vec<CheckRecord>>,
}

impl MemoryHistoryStore {
    /// Creates a new in-memory history store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory history store wrapped in Arc.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of sessions that have recorded at least one check.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    #[instrument(skip(self, record), fields(session_id = %session_id))]
    async fn append(
        &self,
        session_id: &str,
        record: CheckRecord,
    ) -> StorageResult<Vec<CheckRecord>> {
        validate_session_id(session_id)?;

        // Entry API: lock, lazily create, append and snapshot in one unit.
        let mut history = self.sessions.entry(session_id.to_string()).or_default();
        history.push(record);
        Ok(history.clone())
    }

    async fn history(&self, session_id: &str) -> StorageResult<Vec<CheckRecord>> {
        validate_session_id(session_id)?;

        Ok(self
            .sessions
            .get(session_id)
            .map(|history| history.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    use areacheck_domain::ValidatedPoint;
    use chrono::Utc;

    fn record(x: f64, result: bool) -> CheckRecord {
        CheckRecord {
            point: ValidatedPoint {
                x,
                y: 0.0,
                scale: 1.0,
            },
            calculated_at: Utc::now(),
            calculation_time: 0,
            result,
        }
    }

    #[tokio::test]
    async fn test_history_is_created_lazily() {
        let store = MemoryHistoryStore::new();

        // Reading an unknown session yields an empty history, not an error.
        assert!(store.history("fresh").await.unwrap().is_empty());
        assert_eq!(store.session_count(), 0);

        store.append("fresh", record(1.0, true)).await.unwrap();
        assert_eq!(store.session_count(), 1);
        assert_eq!(store.history("fresh").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_append_returns_the_full_history_snapshot() {
        let store = MemoryHistoryStore::new();

        let after_first = store.append("s", record(1.0, true)).await.unwrap();
        assert_eq!(after_first.len(), 1);

        let after_second = store.append("s", record(2.0, false)).await.unwrap();
        assert_eq!(after_second.len(), 2);
        assert_eq!(after_second[0].point.x, 1.0);
        assert_eq!(after_second[1].point.x, 2.0);

        // The earlier snapshot is unaffected by the later append.
        assert_eq!(after_first.len(), 1);
    }

    #[tokio::test]
    async fn test_records_stay_in_insertion_order() {
        let store = MemoryHistoryStore::new();
        for i in 0..10 {
            store.append("s", record(f64::from(i), true)).await.unwrap();
        }

        let history = store.history("s").await.unwrap();
        assert_eq!(history.len(), 10);
        for (i, entry) in history.iter().enumerate() {
            assert_eq!(entry.point.x, i as f64);
        }
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = MemoryHistoryStore::new();
        store.append("a", record(1.0, true)).await.unwrap();
        store.append("b", record(2.0, false)).await.unwrap();

        let a = store.history("a").await.unwrap();
        let b = store.history("b").await.unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(a[0].point.x, 1.0);
        assert_eq!(b[0].point.x, 2.0);
    }

    #[tokio::test]
    async fn test_invalid_session_ids_are_rejected() {
        let store = MemoryHistoryStore::new();

        let result = store.append("", record(1.0, true)).await;
        assert!(matches!(
            result,
            Err(StorageError::InvalidSessionId { .. })
        ));

        let result = store.history(&"x".repeat(1000)).await;
        assert!(matches!(
            result,
            Err(StorageError::InvalidSessionId { .. })
        ));
    }

    // Concurrent appends against one fresh session must not lose or
    // duplicate entries, and every snapshot must be a prefix-consistent
    // view containing the task's own record.
    #[tokio::test]
    async fn test_concurrent_appends_dont_lose_records() {
        let store = MemoryHistoryStore::new_shared();
        let num_tasks = 100;

        let handles: Vec<_> = (0..num_tasks)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let snapshot = store
                        .append("shared", record(f64::from(i), i % 2 == 0))
                        .await
                        .unwrap();
                    // The snapshot always contains the record just appended.
                    assert!(snapshot.iter().any(|r| r.point.x == f64::from(i)));
                })
            })
            .collect();

        futures::future::join_all(handles)
            .await
            .into_iter()
            .for_each(|h| h.unwrap());

        let history = store.history("shared").await.unwrap();
        assert_eq!(history.len(), num_tasks as usize);

        // Every distinct input is represented exactly once.
        for i in 0..num_tasks {
            let count = history
                .iter()
                .filter(|r| r.point.x == f64::from(i))
                .count();
            assert_eq!(count, 1, "record {i} should appear exactly once");
        }
    }

    #[tokio::test]
    async fn test_concurrent_first_appends_create_one_history() {
        let store = MemoryHistoryStore::new_shared();
        let num_tasks = 50;

        let handles: Vec<_> = (0..num_tasks)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append("fresh", record(f64::from(i), true)).await })
            })
            .collect();

        for handle in futures::future::join_all(handles).await {
            handle.unwrap().unwrap();
        }

        // One session, all records, none overwritten by a racing create.
        assert_eq!(store.session_count(), 1);
        assert_eq!(
            store.history("fresh").await.unwrap().len(),
            num_tasks as usize
        );
    }
}
