// src/operations/mod.rs

//! Gates the simulator knows how to apply.
//!
//! Measurement is not a gate here: it returns a classical value and is
//! exposed directly on [`QuantumSimulator::measure`](crate::QuantumSimulator::measure).

use crate::core::QubitId;
use num_complex::Complex;
use num_traits::Zero;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

/// A unitary operation on one or two qubits.
#[derive(Debug, Clone, PartialEq)] // f64 payload, so no Eq
pub enum Gate {
    /// Pauli X (bit flip).
    X(QubitId),
    /// Pauli Y.
    Y(QubitId),
    /// Pauli Z (phase flip).
    Z(QubitId),
    /// Hadamard: maps `|0>` to `(|0> + |1>)/sqrt(2)`.
    H(QubitId),
    /// Phase gate, `diag(1, i)`.
    S(QubitId),
    /// `diag(1, e^(i*PI/4))`.
    T(QubitId),
    /// `diag(1, e^(i*theta))`.
    PhaseShift {
        /// Target qubit.
        target: QubitId,
        /// Angle in radians.
        theta: f64,
    },
    /// Controlled X: flips `target` when `control` is `|1>`.
    Cnot {
        control: QubitId,
        target: QubitId,
    },
    /// Controlled Z: phase `-1` on `|11>`.
    Cz {
        control: QubitId,
        target: QubitId,
    },
}

impl Gate {
    /// All qubits the gate touches, control first for two-qubit gates.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::X(q) | Gate::Y(q) | Gate::Z(q) | Gate::H(q) | Gate::S(q) | Gate::T(q) => vec![*q],
            Gate::PhaseShift { target, .. } => vec![*target],
            Gate::Cnot { control, target } | Gate::Cz { control, target } => vec![*control, *target],
        }
    }

    /// Short symbol used in circuit diagrams.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::X(_) => "X",
            Gate::Y(_) => "Y",
            Gate::Z(_) => "Z",
            Gate::H(_) => "H",
            Gate::S(_) => "S",
            Gate::T(_) => "T",
            Gate::PhaseShift { .. } => "P",
            Gate::Cnot { .. } => "X",
            Gate::Cz { .. } => "Z",
        }
    }

    /// The 2x2 matrix of a single-qubit gate, or of the target action of a
    /// controlled gate.
    pub(crate) fn matrix(&self) -> [[Complex<f64>; 2]; 2] {
        let one = Complex::new(1.0, 0.0);
        let zero = Complex::zero();
        let i = Complex::i();
        match self {
            Gate::X(_) | Gate::Cnot { .. } => [[zero, one], [one, zero]],
            Gate::Y(_) => [[zero, -i], [i, zero]],
            Gate::Z(_) | Gate::Cz { .. } => [[one, zero], [zero, -one]],
            Gate::H(_) => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            Gate::S(_) => [[one, zero], [zero, i]],
            Gate::T(_) => [[one, zero], [zero, Complex::from_polar(1.0, FRAC_PI_4)]],
            Gate::PhaseShift { theta, .. } => [[one, zero], [zero, Complex::from_polar(1.0, *theta)]],
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::PhaseShift { target, theta } => write!(f, "P({:.4}) {}", theta, target),
            Gate::Cnot { control, target } => write!(f, "CNOT {} -> {}", control, target),
            Gate::Cz { control, target } => write!(f, "CZ {} -> {}", control, target),
            single => write!(f, "{} {}", single.symbol(), single.involved_qubits()[0]),
        }
    }
}
