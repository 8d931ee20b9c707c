// src/programs/mod.rs

//! Quantum programs run by the driver, and the [`QuantumBackend`] seam the
//! driver calls them through.

pub mod tutorial;

pub use tutorial::{bell_circuit, entanglement, hello_q, set, superposition, HELLO_MESSAGE};

use crate::core::{Outcome, SimError};
use crate::simulation::QuantumSimulator;

/// The capabilities the quick-start driver needs from a simulator session.
///
/// Every call blocks until the operation has finished. Implementors other
/// than [`QuantumSimulator`] (e.g. deterministic stubs) must honour the
/// same shapes: `zeros + ones == count` and `agree <= count`.
pub trait QuantumBackend {
    /// Runs the hello-world operation.
    fn hello(&mut self) -> Result<(), SimError>;

    /// Runs the superposition sampler, returning `(zeros, ones)`.
    fn superposition(&mut self, count: u64, initial: Outcome) -> Result<(u64, u64), SimError>;

    /// Runs the entanglement sampler, returning `(zeros, ones, agree)`.
    fn entanglement(&mut self, count: u64, initial: Outcome) -> Result<(u64, u64, u64), SimError>;
}

impl QuantumBackend for QuantumSimulator {
    fn hello(&mut self) -> Result<(), SimError> {
        hello_q(self)
    }

    fn superposition(&mut self, count: u64, initial: Outcome) -> Result<(u64, u64), SimError> {
        superposition(self, count, initial)
    }

    fn entanglement(&mut self, count: u64, initial: Outcome) -> Result<(u64, u64, u64), SimError> {
        entanglement(self, count, initial)
    }
}
