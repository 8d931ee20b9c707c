//! Error handling logic

use std::fmt;

/// Identifier of a qubit allocated on a [`QuantumSimulator`](crate::QuantumSimulator).
///
/// Ids are handed out by the simulator in allocation order and are never
/// reused within one simulator instance, so a released id stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Failures raised by the simulator or by the programs running on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A qubit id is unknown to the simulator (never allocated, or already released).
    InvalidQubit {
        /// The offending qubit
        qubit: QubitId,
        /// InvalidQubit failure message
        message: String,
    },

    /// An operation is inconsistent with the current simulator state,
    /// e.g. a controlled gate whose control and target coincide.
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// The state vector lost normalisation beyond tolerance.
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidQubit { qubit, message } => write!(f, "Invalid Qubit ({}): {}", qubit, message),
            SimError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            SimError::Incoherence { message } => write!(f, "Incoherence: {}", message),
            SimError::SimulationError { message } => write!(f, "Simulation Process Error: {}", message),
        }
    }
}

impl std::error::Error for SimError {}
