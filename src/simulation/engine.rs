// src/simulation/engine.rs
use crate::core::{Outcome, QubitId, SimError, StateVector, tolerances};
use crate::operations::Gate;
use crate::validation::{check_normalization, validate_state};
use num_complex::Complex;
use num_traits::Zero;

/// Owns the global state vector and the mapping from qubit ids to register
/// positions. Randomness is supplied by the caller so the engine itself is
/// deterministic.
#[derive(Debug)]
pub(crate) struct StateEngine {
    /// Live qubits in register order; position 0 is the most significant bit.
    qubits: Vec<QubitId>,
    state: StateVector,
}

impl StateEngine {
    /// An engine with no qubits, in the one-dimensional vacuum state.
    pub(crate) fn new() -> Self {
        Self {
            qubits: Vec::new(),
            state: StateVector::vacuum(),
        }
    }

    pub(crate) fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub(crate) fn get_state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn contains(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), SimError> {
        if state.dim() != self.state.dim() {
            return Err(SimError::SimulationError {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            });
        }
        self.state = state;
        Ok(())
    }

    /// Appends a qubit in `|0>` at the least significant position.
    pub(crate) fn push_qubit(&mut self, qubit: QubitId) -> Result<(), SimError> {
        if self.contains(qubit) {
            return Err(SimError::InvalidQubit {
                qubit,
                message: "qubit is already allocated".to_string(),
            });
        }
        if self.qubits.len() + 1 >= usize::BITS as usize {
            return Err(SimError::SimulationError {
                message: "Number of qubits too large, state vector dimension overflows usize.".to_string(),
            });
        }
        self.state.extend_with_zero();
        self.qubits.push(qubit);
        Ok(())
    }

    /// Removes a qubit that is known to be in `|0>` from the register,
    /// factoring it out of the state vector.
    pub(crate) fn remove_zero_qubit(&mut self, qubit: QubitId) -> Result<(), SimError> {
        let position = self.position(qubit)?;
        let k = self.bit_position(position);
        let k_mask = 1usize << k;
        let lower_mask = k_mask - 1;

        let leftover: f64 = self
            .state
            .vector()
            .iter()
            .enumerate()
            .filter(|(i, _)| i & k_mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum();
        if leftover > tolerances::AMPLITUDE {
            return Err(SimError::InvalidOperation {
                message: format!("cannot release {}: it is not in the |0> state (P(1) = {:.3e})", qubit, leftover),
            });
        }

        let mut shrunk = vec![Complex::zero(); self.state.dim() / 2];
        for (i, amp) in self.state.vector().iter().enumerate() {
            if i & k_mask == 0 {
                shrunk[((i >> (k + 1)) << k) | (i & lower_mask)] = *amp;
            }
        }
        self.state = StateVector::new(shrunk);
        self.qubits.remove(position);
        validate_state(&self.state, self.qubits.len())
    }

    /// Applies a gate to the global state.
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<(), SimError> {
        match gate {
            Gate::Cnot { control, target } | Gate::Cz { control, target } => {
                let control_pos = self.position(*control)?;
                let target_pos = self.position(*target)?;
                if control_pos == target_pos {
                    return Err(SimError::InvalidOperation {
                        message: format!("control and target of '{}' cannot be the same qubit", gate),
                    });
                }
                self.apply_controlled_gate(control_pos, target_pos, &gate.matrix());
            }
            single => {
                let target = single.involved_qubits()[0];
                let target_pos = self.position(target)?;
                self.apply_single_qubit_gate(target_pos, &single.matrix());
            }
        }
        Ok(())
    }

    /// Probability that measuring `qubit` yields `One`.
    pub(crate) fn probability_of_one(&self, qubit: QubitId) -> Result<f64, SimError> {
        let k_mask = 1usize << self.bit_position(self.position(qubit)?);
        Ok(self
            .state
            .vector()
            .iter()
            .enumerate()
            .filter(|(i, _)| i & k_mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum())
    }

    /// Measures `qubit` in the Z basis and collapses the state.
    ///
    /// `sample` must be uniform in `[0, 1)`; the outcome is `One` when it
    /// falls below the Born probability of `One`.
    pub(crate) fn measure(&mut self, qubit: QubitId, sample: f64) -> Result<Outcome, SimError> {
        let p_one = self.probability_of_one(qubit)?.clamp(0.0, 1.0);
        // Rounding residue must never select a branch with no amplitude
        let one = p_one >= tolerances::AMPLITUDE && (1.0 - p_one < tolerances::AMPLITUDE || sample < p_one);
        let outcome = Outcome::from_bit(usize::from(one));
        let p_outcome = match outcome {
            Outcome::One => p_one,
            Outcome::Zero => 1.0 - p_one,
        };

        let k_mask = 1usize << self.bit_position(self.position(qubit)?);
        let keep_bit = outcome.bit();
        let scale = 1.0 / p_outcome.sqrt();
        for (i, amp) in self.state.vector_mut().iter_mut().enumerate() {
            if usize::from(i & k_mask != 0) == keep_bit {
                *amp *= scale;
            } else {
                *amp = Complex::zero();
            }
        }

        check_normalization(&self.state, None)?;
        Ok(outcome)
    }

    fn position(&self, qubit: QubitId) -> Result<usize, SimError> {
        self.qubits.iter().position(|q| *q == qubit).ok_or_else(|| SimError::InvalidQubit {
            qubit,
            message: "qubit is not allocated on this simulator".to_string(),
        })
    }

    /// Bit position (from the right, 0-based) of a register position.
    fn bit_position(&self, position: usize) -> usize {
        self.qubits.len() - 1 - position
    }

    /// Applies a 2x2 matrix to the qubit at `target_pos`.
    fn apply_single_qubit_gate(&mut self, target_pos: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let k = self.bit_position(target_pos);
        let k_mask = 1usize << k;
        let lower_mask = k_mask - 1;
        let upper_mask = !((k_mask << 1) - 1);
        let dim = self.state.dim();
        let vector = self.state.vector_mut();

        // Pairs of basis states differing only at the target bit
        for i in 0..dim / 2 {
            let i0 = ((i << 1) & upper_mask) | (i & lower_mask);
            let i1 = i0 | k_mask;
            let (psi_0, psi_1) = (vector[i0], vector[i1]);
            vector[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            vector[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Applies `matrix` to the target qubit on the subspace where the control qubit is `|1>`.
    fn apply_controlled_gate(&mut self, control_pos: usize, target_pos: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let c_mask = 1usize << self.bit_position(control_pos);
        let t_mask = 1usize << self.bit_position(target_pos);
        let dim = self.state.dim();
        let vector = self.state.vector_mut();

        for i0 in 0..dim {
            // visit each (control=1, target=0) index once, paired with its target=1 partner
            if i0 & c_mask == 0 || i0 & t_mask != 0 {
                continue;
            }
            let i1 = i0 | t_mask;
            let (psi_0, psi_1) = (vector[i0], vector[i1]);
            vector[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            vector[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }
}
