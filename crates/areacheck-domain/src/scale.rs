//! Snapping an approximate scale onto the legal discrete set.

use thiserror::Error;

use crate::error::{DomainError, DomainResult};

/// Legal scale values accepted by default.
pub const DEFAULT_SCALE_VALUES: [f64; 5] = [1.0, 1.5, 2.0, 2.5, 3.0];

/// Default half-width of each acceptance window.
pub const DEFAULT_SCALE_TOLERANCE: f64 = 0.20;

/// Error constructing a [`ScaleTable`] from configuration.
#[derive(Debug, Error)]
#[error("invalid scale table: {reason}")]
pub struct InvalidScaleTable {
    pub reason: String,
}

/// One legal scale value with its acceptance window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleStep {
    pub value: f64,
    pub tolerance: f64,
}

/// Ordered table of legal scale values.
///
/// [`snap`](Self::snap) returns the first entry whose window contains the
/// query, so entry order is the tie-break if windows ever overlap. The
/// default table (0.5 spacing, 0.20 tolerance) has no overlapping windows.
#[derive(Debug, Clone)]
pub struct ScaleTable {
    steps: Vec<ScaleStep>,
}

impl ScaleTable {
    /// Builds a table from legal values sharing one tolerance.
    ///
    /// Values must be finite and nonzero (the normalizer divides by the
    /// snapped value), the tolerance finite; the set must not be empty.
    pub fn new(values: &[f64], tolerance: f64) -> Result<Self, InvalidScaleTable> {
        if values.is_empty() {
            return Err(InvalidScaleTable {
                reason: "legal scale set must not be empty".to_string(),
            });
        }
        if !tolerance.is_finite() {
            return Err(InvalidScaleTable {
                reason: format!("tolerance must be finite, got {tolerance}"),
            });
        }
        for &value in values {
            if !value.is_finite() || value == 0.0 {
                return Err(InvalidScaleTable {
                    reason: format!("legal scale values must be finite and nonzero, got {value}"),
                });
            }
        }

        let tolerance = tolerance.abs();
        Ok(Self {
            steps: values
                .iter()
                .map(|&value| ScaleStep { value, tolerance })
                .collect(),
        })
    }

    /// The table's entries in snap order.
    pub fn steps(&self) -> &[ScaleStep] {
        &self.steps
    }

    /// Snaps `approx` onto the first legal value whose window contains it.
    ///
    /// A step `t` with tolerance `tol` matches when
    /// `t - tol <= approx <= t + tol`, both sides inclusive. Fails with
    /// [`DomainError::InvalidValue`] when no window contains `approx`.
    pub fn snap(&self, param: &str, approx: f64) -> DomainResult<f64> {
        for step in &self.steps {
            let tol = step.tolerance.abs();
            if step.value - tol <= approx && approx <= step.value + tol {
                return Ok(step.value);
            }
        }

        Err(DomainError::invalid_value(
            param,
            format!("value {approx} is not within tolerance of any legal scale"),
        ))
    }
}

impl Default for ScaleTable {
    fn default() -> Self {
        Self::new(&DEFAULT_SCALE_VALUES, DEFAULT_SCALE_TOLERANCE)
            .expect("default scale table is valid")
    }
}
