//! History store trait definition.

use areacheck_domain::CheckRecord;
use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};

/// Longest accepted session identifier, in bytes.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Per-session, append-only log of check outcomes.
///
/// Appends are exactly-once and order-preserving under concurrent callers
/// sharing one session: the get-or-create plus append sequence must execute
/// as a single atomic unit per session key. Callers for different sessions
/// must not contend on the same lock. Records are never mutated or removed;
/// histories grow unbounded for the life of the session and are dropped
/// with the store.
#[async_trait]
pub trait HistoryStore: Send + Sync + 'static {
    /// Appends `record` to the session's history, creating the history on
    /// first use, and returns a snapshot of the full ordered history
    /// including the new record.
    async fn append(
        &self,
        session_id: &str,
        record: CheckRecord,
    ) -> StorageResult<Vec<CheckRecord>>;

    /// Snapshot of the session's history, oldest first.
    ///
    /// A session that has never recorded a check yields an empty history.
    async fn history(&self, session_id: &str) -> StorageResult<Vec<CheckRecord>>;
}

/// Validates a session identifier before it is used as a store key.
pub fn validate_session_id(session_id: &str) -> StorageResult<()> {
    if session_id.is_empty() {
        return Err(StorageError::InvalidSessionId {
            reason: "session id must not be empty".to_string(),
        });
    }
    if session_id.len() > MAX_SESSION_ID_LEN {
        return Err(StorageError::InvalidSessionId {
            reason: format!(
                "session id exceeds {MAX_SESSION_ID_LEN} bytes: got {}",
                session_id.len()
            ),
        });
    }
    Ok(())
}
