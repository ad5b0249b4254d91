//! HTTP route definitions and handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::error;

use areacheck_domain::{CheckRecord, DomainError, RawParams};
use areacheck_server::CheckError;
use areacheck_storage::{HistoryStore, StorageError};

use super::state::AppState;
use crate::middleware::{RequestIdLayer, RequestLoggingLayer};

/// Default request body size limit (32KB).
///
/// The API is query-string driven; request bodies carry no meaning here.
pub const DEFAULT_BODY_LIMIT: usize = 32 * 1024;

fn api_routes<S: HistoryStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/sessions/:session_id/area-check", get(area_check::<S>))
        .route(
            "/sessions/:session_id/area-check/history",
            get(area_check_history::<S>),
        )
}

/// Creates the HTTP router with all endpoints and middleware.
pub fn create_router<S: HistoryStore>(state: AppState<S>) -> Router {
    let shared_state = Arc::new(state);
    api_routes::<S>()
        .route("/health", get(health_check))
        .with_state(shared_state)
        .layer(RequestBodyLimitLayer::new(DEFAULT_BODY_LIMIT))
        .layer(RequestLoggingLayer::new())
        .layer(RequestIdLayer::new())
}

// ============================================================
// Error Handling
// ============================================================

/// Machine-readable error codes carried in error payloads.
///
/// Each code maps to an HTTP status via [`ApiError::into_response`]: the
/// three validation kinds and `invalid_session` are 400 Bad Request,
/// everything else is 500.
pub mod error_codes {
    /// A required parameter key is entirely absent.
    pub const PARAM_NOT_FOUND: &str = "param_not_found";
    /// Key present but carries no value.
    pub const PARAM_VALUE_NOT_PROVIDED: &str = "param_value_not_provided";
    /// Value present but fails length, parse, range, or scale-set checks.
    pub const INVALID_VALUE: &str = "invalid_value";
    /// Session identifier failed input bounds.
    pub const INVALID_SESSION: &str = "invalid_session";
    /// Unexpected internal error.
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// API error response payload.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error (500).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use error_codes::*;

        let status = match self.code.as_str() {
            PARAM_NOT_FOUND | PARAM_VALUE_NOT_PROVIDED | INVALID_VALUE | INVALID_SESSION => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let code = match &err {
            DomainError::ParamNotFound { .. } => error_codes::PARAM_NOT_FOUND,
            DomainError::ParamValueNotProvided { .. } => error_codes::PARAM_VALUE_NOT_PROVIDED,
            DomainError::InvalidValue { .. } => error_codes::INVALID_VALUE,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::InvalidSessionId { .. } => {
                ApiError::new(error_codes::INVALID_SESSION, err.to_string())
            }
            StorageError::InternalError { .. } => {
                error!("Storage error: {}", err);
                ApiError::internal_error("internal error during area check")
            }
        }
    }
}

impl From<CheckError> for ApiError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::Validation(e) => e.into(),
            CheckError::Storage(e) => e.into(),
        }
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ============================================================
// Health Check
// ============================================================

/// Basic health check - returns 200 if the server is running.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Area Check Operation
// ============================================================

/// Response for the area-check operation: the session's full history,
/// oldest first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub user_area_data: UserAreaData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAreaData {
    pub area_data_list: Vec<CheckRecord>,
}

impl CheckResponse {
    fn from_history(history: Vec<CheckRecord>) -> Self {
        Self {
            user_area_data: UserAreaData {
                area_data_list: history,
            },
        }
    }
}

/// Parses the raw query string into the multi-valued parameter bag.
///
/// Typed extractors are deliberately not used: the contract distinguishes
/// an absent key, a key with an empty value (`scale=`), and repeated keys
/// (first value wins), which a typed struct would collapse.
fn parse_raw_params(query: Option<&str>) -> RawParams {
    let mut params = RawParams::new();
    let Some(query) = query else {
        return params;
    };

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    params
}

async fn area_check<S: HistoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(session_id): Path<String>,
    RawQuery(query): RawQuery,
) -> ApiResult<impl IntoResponse> {
    let params = parse_raw_params(query.as_deref());
    let history = state.handler.check(&session_id, &params).await?;

    Ok(Json(CheckResponse::from_history(history)))
}

async fn area_check_history<S: HistoryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(session_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let history = state.handler.history(&session_id).await?;

    Ok(Json(CheckResponse::from_history(history)))
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_parse_raw_params_keeps_duplicate_values_in_order() {
        let params = parse_raw_params(Some("scale=1&scale=2&pointX=0.5"));
        assert_eq!(params["scale"], vec!["1", "2"]);
        assert_eq!(params["pointX"], vec!["0.5"]);
    }

    #[test]
    fn test_parse_raw_params_distinguishes_empty_values() {
        // `scale=` and a bare `scale` both arrive as one empty value;
        // a missing key stays missing.
        let params = parse_raw_params(Some("scale=&pointX"));
        assert_eq!(params["scale"], vec![""]);
        assert_eq!(params["pointX"], vec![""]);
        assert!(!params.contains_key("pointY"));

        assert!(parse_raw_params(None).is_empty());
    }

    #[test]
    fn test_parse_raw_params_decodes_percent_escapes() {
        let params = parse_raw_params(Some("pointX=%2D1.5"));
        assert_eq!(params["pointX"], vec!["-1.5"]);
    }

    #[test]
    fn test_api_error_status_mapping() {
        let response = ApiError::new(error_codes::INVALID_VALUE, "bad").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::internal_error("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_domain_errors_map_to_codes() {
        let err: ApiError = DomainError::ParamNotFound {
            param: "scale".to_string(),
        }
        .into();
        assert_eq!(err.code, error_codes::PARAM_NOT_FOUND);
        assert!(err.message.contains("scale"));

        let err: ApiError = DomainError::ParamValueNotProvided {
            param: "scale".to_string(),
        }
        .into();
        assert_eq!(err.code, error_codes::PARAM_VALUE_NOT_PROVIDED);

        let err: ApiError = DomainError::invalid_value("pointX", "out of range").into();
        assert_eq!(err.code, error_codes::INVALID_VALUE);
        assert!(err.message.contains("pointX"));
    }
}
