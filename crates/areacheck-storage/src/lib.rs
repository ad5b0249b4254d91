//! areacheck-storage: Session history storage
//!
//! This crate provides the storage abstraction for the area-check service:
//! - `HistoryStore` trait for per-session append-only logs
//! - In-memory implementation backing the server
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             areacheck-storage                │
//! ├─────────────────────────────────────────────┤
//! │  traits.rs - HistoryStore trait definition  │
//! │  memory.rs - In-memory implementation       │
//! └─────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use memory::MemoryHistoryStore;
pub use traits::HistoryStore;
