//! HTTP REST endpoints.

mod routes;
mod state;


pub use routes::{create_router, ApiError, CheckResponse, UserAreaData, DEFAULT_BODY_LIMIT};
pub use state::AppState;
