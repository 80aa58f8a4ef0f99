//! Calibration of the utility shift ū from a target v(c0)
//!
//! The usual target is v(c0) ≈ 6, matching value-of-statistical-life estimates.

use aigrowth_common::{
    error::{ensure_finite, ensure_positive},
    is_unit_curvature, Result,
};

/// Solve v(c0) = target_v for ū
///
/// ```text
/// γ = 1: ū = v* − ln c0
/// γ ≠ 1: ū = (v* − 1/(1−γ)) / c0^(γ−1)
/// ```
pub fn calibrate_ubar(target_v: f64, c0: f64, gamma: f64) -> Result<f64> {
    ensure_finite("target_v", target_v)?;
    ensure_positive("c0", c0)?;
    ensure_positive("gamma", gamma)?;

    if is_unit_curvature(gamma) {
        return Ok(target_v - c0.ln());
    }
    Ok((target_v - 1.0 / (1.0 - gamma)) / c0.powf(gamma - 1.0))
}
