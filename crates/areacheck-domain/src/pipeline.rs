//! Stage orchestration for one validation run.

use crate::error::DomainResult;
use crate::params::{first_param, RawParams};
use crate::point::{normalize, ValidatedPoint};
use crate::scale::ScaleTable;
use crate::validate::{check_range, parse_decimal};

/// Wire name of the X coordinate parameter.
pub const PARAM_POINT_X: &str = "pointX";
/// Wire name of the Y coordinate parameter.
pub const PARAM_POINT_Y: &str = "pointY";
/// Wire name of the scale parameter.
pub const PARAM_SCALE: &str = "scale";

/// Inclusive bounds accepted for the X coordinate.
pub const POINT_X_RANGE: (f64, f64) = (-3.0, 3.0);
/// Inclusive bounds accepted for the Y coordinate.
pub const POINT_Y_RANGE: (f64, f64) = (-5.0, 5.0);

/// Runs extraction, numeric validation, quantization and normalization.
///
/// Stages run strictly in order and the first failure aborts the run: a
/// [`ValidatedPoint`] is only constructed after every check has passed.
/// Range checks on `pointX`/`pointY` happen before the scale is resolved,
/// so an out-of-range coordinate never reaches the quantizer.
pub fn validate_point(params: &RawParams, scales: &ScaleTable) -> DomainResult<ValidatedPoint> {
    let raw_x = first_param(params, PARAM_POINT_X)?;
    let raw_y = first_param(params, PARAM_POINT_Y)?;
    let raw_scale = first_param(params, PARAM_SCALE)?;

    let x = parse_decimal(PARAM_POINT_X, raw_x)?;
    check_range(PARAM_POINT_X, POINT_X_RANGE.0, x, POINT_X_RANGE.1)?;

    let y = parse_decimal(PARAM_POINT_Y, raw_y)?;
    check_range(PARAM_POINT_Y, POINT_Y_RANGE.0, y, POINT_Y_RANGE.1)?;

    let approx = parse_decimal(PARAM_SCALE, raw_scale)?;
    let scale = scales.snap(PARAM_SCALE, approx)?;

    Ok(ValidatedPoint {
        x: normalize(x, scale),
        y: normalize(y, scale),
        scale,
    })
}
