//! Request handlers.

pub mod check;

pub use check::{CheckError, CheckHandler};
