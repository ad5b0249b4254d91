//! Area-check pipeline orchestration.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use areacheck_domain::{
    validate_point, CheckRecord, DomainError, RawParams, Region, ScaleTable,
};
use areacheck_storage::{HistoryStore, StorageError};

/// Error from one check run.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Request input failed validation; nothing was computed or stored.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The session store rejected the operation.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Orchestrates one area check end to end: validate, quantize, normalize,
/// evaluate the region predicate, record the outcome, and hand back the
/// session's full history.
///
/// The handler itself is stateless between requests; all shared state lives
/// behind the [`HistoryStore`].
pub struct CheckHandler<S> {
    store: Arc<S>,
    region: Arc<dyn Region>,
    scales: ScaleTable,
}

impl<S: HistoryStore> CheckHandler<S> {
    pub fn new(store: Arc<S>, region: Arc<dyn Region>, scales: ScaleTable) -> Self {
        Self {
            store,
            region,
            scales,
        }
    }

    /// Runs the full pipeline for one request.
    ///
    /// Any validation failure aborts before the region predicate runs and
    /// before the store is touched: no partial record is ever appended. On
    /// success the returned history is the session's complete ordered log
    /// including the new record, oldest first.
    pub async fn check(
        &self,
        session_id: &str,
        params: &RawParams,
    ) -> Result<Vec<CheckRecord>, CheckError> {
        let started = Instant::now();

        let point = validate_point(params, &self.scales)?;
        let result = self.region.contains(&point);

        let record = CheckRecord {
            point,
            calculated_at: Utc::now(),
            calculation_time: started.elapsed().as_secs() as i64,
            result,
        };

        debug!(
            x = point.x,
            y = point.y,
            scale = point.scale,
            result,
            "area check computed"
        );

        let history = self.store.append(session_id, record).await?;
        Ok(history)
    }

    /// Read-only snapshot of a session's history, oldest first.
    pub async fn history(&self, session_id: &str) -> Result<Vec<CheckRecord>, CheckError> {
        Ok(self.store.history(session_id).await?)
    }
}
