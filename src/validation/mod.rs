// src/validation/mod.rs

//! Checks applied to a [`StateVector`] by the simulator and available to callers.

use crate::core::{SimError, StateVector, tolerances};

/// Checks that the state vector is normalised (sum of `|c_i|^2` ≈ 1.0).
///
/// # Arguments
/// * `state` - The state to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to [`tolerances::NORM`].
///
/// # Returns
/// * `Ok(())` if normalised within tolerance.
/// * `Err(SimError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), SimError> {
    let effective_tolerance = tolerance.unwrap_or(tolerances::NORM);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(SimError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that the state vector length is a power of two matching `num_qubits`.
pub fn check_dimension(state: &StateVector, num_qubits: usize) -> Result<(), SimError> {
    let expected = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| SimError::SimulationError {
        message: format!("{} qubits overflow the state vector dimension", num_qubits),
    })?;
    if state.dim() != expected {
        return Err(SimError::SimulationError {
            message: format!(
                "State vector has dimension {} but {} qubits require {}",
                state.dim(),
                num_qubits,
                expected
            ),
        });
    }
    Ok(())
}

/// Runs all structural checks on a state.
pub fn validate_state(state: &StateVector, num_qubits: usize) -> Result<(), SimError> {
    check_dimension(state, num_qubits)?;
    check_normalization(state, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_normalized_state_passes() {
        let state = StateVector::new(vec![Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(0.0, FRAC_1_SQRT_2)]);
        assert!(check_normalization(&state, None).is_ok());
        assert!(validate_state(&state, 1).is_ok());
    }

    #[test]
    fn test_unnormalized_state_fails() {
        let state = StateVector::new(vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)]);
        match check_normalization(&state, None) {
            Err(SimError::Incoherence { .. }) => {}
            other => panic!("Expected Incoherence, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let state = StateVector::vacuum();
        assert!(check_dimension(&state, 0).is_ok());
        assert!(matches!(check_dimension(&state, 2), Err(SimError::SimulationError { .. })));
    }
}
