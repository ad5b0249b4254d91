//! Application state for HTTP handlers.

use std::sync::Arc;

use areacheck_domain::{Region, ScaleTable};
use areacheck_server::CheckHandler;
use areacheck_storage::HistoryStore;

/// Application state shared across all HTTP handlers.
///
/// # Type Parameters
///
/// * `S` - The session store implementing `HistoryStore`
pub struct AppState<S: HistoryStore> {
    /// The check pipeline handler.
    pub handler: Arc<CheckHandler<S>>,
}

impl<S: HistoryStore> AppState<S> {
    /// Creates a new application state wiring the store, the region
    /// predicate, and the quantizer table into one check handler.
    pub fn new(store: Arc<S>, region: Arc<dyn Region>, scales: ScaleTable) -> Self {
        Self {
            handler: Arc::new(CheckHandler::new(store, region, scales)),
        }
    }
}
