//! Normalized point and per-check record types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A fully validated point in canonical coordinate space.
///
/// Coordinates are stored already divided by `scale`. A value of this type
/// only exists past the end of the validation pipeline; it is never built
/// from unchecked input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedPoint {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

/// Divides a raw coordinate by its resolved scale.
///
/// The scale comes out of the quantizer table, which rejects zero entries
/// at construction, so the division is always well-defined.
pub fn normalize(raw: f64, scale: f64) -> f64 {
    debug_assert!(scale != 0.0);
    raw / scale
}

/// Outcome of one successful pipeline run.
///
/// Immutable once constructed; `calculated_at` serializes as an RFC 3339
/// timestamp and `calculation_time` as whole seconds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRecord {
    pub point: ValidatedPoint,
    pub calculated_at: DateTime<Utc>,
    pub calculation_time: i64,
    pub result: bool,
}
