// src/simulation/mod.rs

//! The `QuantumSimulator` entry point and its internal `StateEngine`.
//!
//! A simulator is an exclusively owned session: qubits are allocated on it,
//! gates and measurements are applied through it, and everything is dropped
//! with it.

pub(crate) mod engine;

use crate::circuits::Circuit;
use crate::core::{Outcome, QubitId, SimError, StateVector};
use crate::operations::Gate;
use engine::StateEngine;
use log::{debug, trace};
use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use std::fmt;

/// Sink receiving diagnostic messages emitted by programs.
pub type MessageSink = Box<dyn FnMut(&str)>;

/// Construction options for a [`QuantumSimulator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Fixed seed for measurement sampling. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SimulatorConfig {
    /// A configuration with a fixed sampling seed.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// A state-vector quantum simulator.
///
/// # Examples
///
/// ```
/// use qstart::{Gate, Outcome, QuantumSimulator, SimError, SimulatorConfig};
///
/// # fn main() -> Result<(), SimError> {
/// let mut sim = QuantumSimulator::with_config(SimulatorConfig::seeded(7));
/// let q = sim.allocate(1)?[0];
/// sim.apply(&Gate::X(q))?;
/// assert_eq!(sim.measure(q)?, Outcome::One);
/// sim.release(&[q])?;
/// # Ok(())
/// # }
/// ```
pub struct QuantumSimulator {
    engine: StateEngine,
    rng: StdRng,
    /// Next id handed out by `allocate`; ids are never reused.
    next_id: u64,
    on_message: MessageSink,
    measurements: u64,
}

impl QuantumSimulator {
    /// Creates a simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Creates a simulator from an explicit configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| StandardUniform.sample(&mut rand::rng()));
        debug!("simulator acquired (seed: {}, fixed: {})", seed, config.seed.is_some());
        Self {
            engine: StateEngine::new(),
            rng: StdRng::seed_from_u64(seed),
            next_id: 0,
            on_message: Box::new(|msg: &str| println!("{}", msg)),
            measurements: 0,
        }
    }

    /// Replaces the sink that receives [`message`](Self::message) output.
    pub fn on_message<F>(mut self, sink: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_message = Box::new(sink);
        self
    }

    /// Emits a diagnostic message on behalf of a running program.
    pub fn message(&mut self, msg: &str) {
        (self.on_message)(msg);
    }

    /// Allocates `count` fresh qubits in `|0>`.
    pub fn allocate(&mut self, count: usize) -> Result<Vec<QubitId>, SimError> {
        let mut allocated = Vec::with_capacity(count);
        for _ in 0..count {
            let qubit = QubitId(self.next_id);
            self.engine.push_qubit(qubit)?;
            self.next_id += 1;
            allocated.push(qubit);
        }
        trace!("allocated {:?}, register now {} qubits", allocated, self.engine.num_qubits());
        Ok(allocated)
    }

    /// Resets the given qubits to `|0>` and removes them from the register.
    pub fn release(&mut self, qubits: &[QubitId]) -> Result<(), SimError> {
        for qubit in qubits {
            self.reset(*qubit)?;
            self.engine.remove_zero_qubit(*qubit)?;
        }
        trace!("released {:?}, register now {} qubits", qubits, self.engine.num_qubits());
        Ok(())
    }

    /// Applies a single gate.
    pub fn apply(&mut self, gate: &Gate) -> Result<(), SimError> {
        trace!("apply {}", gate);
        self.engine.apply_gate(gate)
    }

    /// Applies every gate of `circuit` in order.
    ///
    /// All qubits named by the circuit must already be allocated; nothing is
    /// applied if one of them is missing.
    pub fn run(&mut self, circuit: &Circuit) -> Result<(), SimError> {
        if let Some(missing) = circuit.qubits().iter().find(|q| !self.engine.contains(**q)) {
            return Err(SimError::InvalidQubit {
                qubit: *missing,
                message: "circuit uses a qubit that is not allocated on this simulator".to_string(),
            });
        }
        for gate in circuit.gates() {
            self.apply(gate)?;
        }
        Ok(())
    }

    /// Measures `qubit` in the Z basis, collapsing the state.
    pub fn measure(&mut self, qubit: QubitId) -> Result<Outcome, SimError> {
        let sample: f64 = StandardUniform.sample(&mut self.rng);
        let outcome = self.engine.measure(qubit, sample)?;
        self.measurements += 1;
        trace!("measure {} -> {}", qubit, outcome);
        Ok(outcome)
    }

    /// Measures `qubit` and flips it back to `|0>` if it came out `One`.
    pub fn reset(&mut self, qubit: QubitId) -> Result<(), SimError> {
        if self.measure(qubit)? == Outcome::One {
            self.apply(&Gate::X(qubit))?;
        }
        Ok(())
    }

    /// Probability that measuring `qubit` now would yield `One`. Does not
    /// disturb the state.
    pub fn probability_of_one(&self, qubit: QubitId) -> Result<f64, SimError> {
        self.engine.probability_of_one(qubit)
    }

    /// Number of currently allocated qubits.
    pub fn num_qubits(&self) -> usize {
        self.engine.num_qubits()
    }

    /// The current global state vector.
    pub fn state(&self) -> &StateVector {
        self.engine.get_state()
    }
}

impl Default for QuantumSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuantumSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuantumSimulator")
            .field("engine", &self.engine)
            .field("next_id", &self.next_id)
            .field("measurements", &self.measurements)
            .finish_non_exhaustive()
    }
}

impl Drop for QuantumSimulator {
    fn drop(&mut self) {
        debug!(
            "simulator released ({} qubits still allocated, {} measurements)",
            self.engine.num_qubits(),
            self.measurements
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_allocate_assigns_fresh_ids() -> Result<(), SimError> {
        let mut sim = QuantumSimulator::with_config(SimulatorConfig::seeded(1));
        let first = sim.allocate(2)?;
        sim.release(&first)?;
        let second = sim.allocate(1)?;
        assert_eq!(first, vec![QubitId(0), QubitId(1)]);
        assert_eq!(second, vec![QubitId(2)]);
        assert_eq!(sim.num_qubits(), 1);
        Ok(())
    }

    #[test]
    fn test_released_qubit_is_invalid() -> Result<(), SimError> {
        let mut sim = QuantumSimulator::with_config(SimulatorConfig::seeded(1));
        let q = sim.allocate(1)?[0];
        sim.release(&[q])?;
        assert!(matches!(sim.apply(&Gate::H(q)), Err(SimError::InvalidQubit { .. })));
        Ok(())
    }

    #[test]
    fn test_release_entangled_qubit_resets_it() -> Result<(), SimError> {
        let mut sim = QuantumSimulator::with_config(SimulatorConfig::seeded(5));
        let qs = sim.allocate(2)?;
        sim.apply(&Gate::H(qs[0]))?;
        sim.apply(&Gate::Cnot { control: qs[0], target: qs[1] })?;
        sim.release(&qs[..1])?;

        assert_eq!(sim.num_qubits(), 1);
        assert_eq!(sim.state().dim(), 2);
        assert!((sim.state().norm_sqr() - 1.0).abs() < 1e-9);
        // the partner collapsed to a basis state
        let p = sim.probability_of_one(qs[1])?;
        assert!(p < 1e-9 || (p - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_run_rejects_unallocated_circuit_qubit() -> Result<(), SimError> {
        let mut sim = QuantumSimulator::with_config(SimulatorConfig::seeded(1));
        let q = sim.allocate(1)?[0];
        let circuit = CircuitBuilder::new()
            .add_gate(Gate::X(q))
            .add_gate(Gate::Cnot { control: q, target: QubitId(42) })
            .build();

        assert!(matches!(sim.run(&circuit), Err(SimError::InvalidQubit { qubit: QubitId(42), .. })));
        // nothing applied
        assert!(sim.probability_of_one(q)? < 1e-9);
        Ok(())
    }

    #[test]
    fn test_message_goes_to_sink() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut sim = QuantumSimulator::with_config(SimulatorConfig::seeded(1))
            .on_message(move |msg| sink.borrow_mut().push(msg.to_string()));
        sim.message("ping");
        assert_eq!(*seen.borrow(), vec!["ping".to_string()]);
    }

    #[test]
    fn test_reset_returns_to_zero() -> Result<(), SimError> {
        let mut sim = QuantumSimulator::with_config(SimulatorConfig::seeded(9));
        let q = sim.allocate(1)?[0];
        sim.apply(&Gate::H(q))?;
        sim.reset(q)?;
        assert!(sim.probability_of_one(q)? < 1e-9);
        Ok(())
    }
}
