//! areacheck-server: Pipeline orchestration and configuration
//!
//! This crate ties the domain pipeline to the session store:
//! - `CheckHandler` runs one area check end to end
//! - `ServerConfig` loads and validates the service configuration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             areacheck-server                 │
//! ├─────────────────────────────────────────────┤
//! │  config.rs   - File + env configuration     │
//! │  handlers/   - Check pipeline orchestration │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod handlers;

pub use config::ServerConfig;
pub use handlers::{CheckError, CheckHandler};
