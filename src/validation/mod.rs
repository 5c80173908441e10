// src/validation/mod.rs

//! Provides functions to validate a `StateVector`.
//!
//! Gates preserve the norm by construction, so nothing here runs
//! automatically; callers use these checks after building a state by hand or
//! after long gate sequences.

use crate::core::{NORM_TOLERANCE, QregError, Result, StateVector};

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0; `None` uses [`NORM_TOLERANCE`].
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QregError::NotNormalized)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.total_probability();
    if (norm_sq - 1.0).abs() > effective_tolerance || !norm_sq.is_finite() {
        return Err(QregError::NotNormalized {
            norm_sqr: format!("{}", norm_sq),
            tolerance: format!("{:e}", effective_tolerance),
        });
    }
    Ok(())
}

/// Performs the structural and normalization checks on a state.
///
/// The dimension must be exactly `2^n`, and the norm must pass
/// [`check_normalization`] with `norm_tolerance`.
pub fn validate_state(state: &StateVector, norm_tolerance: Option<f64>) -> Result<()> {
    let expected = 1usize << state.qubit_count();
    if state.dimension() != expected {
        return Err(QregError::BasisIndexOutOfRange {
            index: state.dimension(),
            dimension: expected,
        });
    }
    check_normalization(state, norm_tolerance)
}
