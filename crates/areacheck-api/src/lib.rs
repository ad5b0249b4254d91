//! areacheck-api: HTTP API layer
//!
//! This crate provides the API layer including:
//! - HTTP REST endpoints via Axum
//! - Middleware (request id, request logging)
//! - Observability (structured logging setup)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               areacheck-api                  │
//! ├─────────────────────────────────────────────┤
//! │  http/          - HTTP REST endpoints       │
//! │  middleware/    - Request id, logging       │
//! │  observability/ - tracing setup             │
//! └─────────────────────────────────────────────┘
//! ```

pub mod http;
pub mod middleware;
pub mod observability;
