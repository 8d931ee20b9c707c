// src/programs/tutorial.rs

//! The three quick-start operations.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{Outcome, QubitId, SimError};
use crate::operations::Gate;
use crate::simulation::QuantumSimulator;
use log::debug;

/// Greeting emitted by [`hello_q`].
pub const HELLO_MESSAGE: &str = "Hello quantum world!";

/// Emits [`HELLO_MESSAGE`] through the simulator's message channel.
pub fn hello_q(sim: &mut QuantumSimulator) -> Result<(), SimError> {
    sim.message(HELLO_MESSAGE);
    Ok(())
}

/// Drives `qubit` into the basis state `desired`: measure, and flip if the
/// result differs.
pub fn set(sim: &mut QuantumSimulator, desired: Outcome, qubit: QubitId) -> Result<(), SimError> {
    if sim.measure(qubit)? != desired {
        sim.apply(&Gate::X(qubit))?;
    }
    Ok(())
}

/// Prepares one qubit in `initial`, applies H and measures, `count` times.
///
/// Returns `(zeros, ones)`; `zeros + ones == count`. Either initial value
/// yields an approximately even split.
pub fn superposition(sim: &mut QuantumSimulator, count: u64, initial: Outcome) -> Result<(u64, u64), SimError> {
    let qubit = sim.allocate(1)?[0];
    let mut ones = 0;

    for _ in 0..count {
        set(sim, initial, qubit)?;
        sim.apply(&Gate::H(qubit))?;
        if sim.measure(qubit)? == Outcome::One {
            ones += 1;
        }
    }

    set(sim, Outcome::Zero, qubit)?;
    sim.release(&[qubit])?;
    debug!("superposition(count={}, initial={}) -> ones={}", count, initial, ones);
    Ok((count - ones, ones))
}

/// The H + CNOT sequence that entangles `target` with `control`.
pub fn bell_circuit(control: QubitId, target: QubitId) -> Circuit {
    CircuitBuilder::new()
        .add_gate(Gate::H(control))
        .add_gate(Gate::Cnot { control, target })
        .build()
}

/// Prepares `q0` in `initial` and `q1` in `Zero`, entangles them and
/// measures both, `count` times.
///
/// Returns `(zeros, ones, agree)` where the first two count outcomes of `q0`
/// and `agree` counts rounds in which both qubits measured the same.
pub fn entanglement(
    sim: &mut QuantumSimulator,
    count: u64,
    initial: Outcome,
) -> Result<(u64, u64, u64), SimError> {
    let qubits = sim.allocate(2)?;
    let (q0, q1) = (qubits[0], qubits[1]);
    let circuit = bell_circuit(q0, q1);
    debug!("entanglement circuit:\n{}", circuit);

    let mut ones = 0;
    let mut agree = 0;
    for _ in 0..count {
        set(sim, initial, q0)?;
        set(sim, Outcome::Zero, q1)?;
        sim.run(&circuit)?;

        let res = sim.measure(q0)?;
        if sim.measure(q1)? == res {
            agree += 1;
        }
        if res == Outcome::One {
            ones += 1;
        }
    }

    set(sim, Outcome::Zero, q0)?;
    set(sim, Outcome::Zero, q1)?;
    sim.release(&qubits)?;
    debug!(
        "entanglement(count={}, initial={}) -> ones={}, agree={}",
        count, initial, ones, agree
    );
    Ok((count - ones, ones, agree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulatorConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn seeded(seed: u64) -> QuantumSimulator {
        QuantumSimulator::with_config(SimulatorConfig::seeded(seed))
    }

    #[test]
    fn test_hello_emits_message() -> Result<(), SimError> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut sim = seeded(0).on_message(move |m| sink.borrow_mut().push(m.to_string()));
        hello_q(&mut sim)?;
        assert_eq!(*seen.borrow(), vec![HELLO_MESSAGE.to_string()]);
        Ok(())
    }

    #[test]
    fn test_set_forces_basis_state() -> Result<(), SimError> {
        let mut sim = seeded(3);
        let q = sim.allocate(1)?[0];
        sim.apply(&Gate::H(q))?;
        set(&mut sim, Outcome::One, q)?;
        assert!((sim.probability_of_one(q)? - 1.0).abs() < 1e-9);
        set(&mut sim, Outcome::Zero, q)?;
        assert!(sim.probability_of_one(q)? < 1e-9);
        Ok(())
    }

    #[test]
    fn test_superposition_releases_its_qubit() -> Result<(), SimError> {
        let mut sim = seeded(11);
        let (zeros, ones) = superposition(&mut sim, 10, Outcome::One)?;
        assert_eq!(zeros + ones, 10);
        assert_eq!(sim.num_qubits(), 0);
        Ok(())
    }

    #[test]
    fn test_entanglement_always_agrees() -> Result<(), SimError> {
        let mut sim = seeded(12);
        let (zeros, ones, agree) = entanglement(&mut sim, 50, Outcome::Zero)?;
        assert_eq!(zeros + ones, 50);
        assert_eq!(agree, 50);
        assert_eq!(sim.num_qubits(), 0);
        Ok(())
    }

    #[test]
    fn test_zero_repetitions() -> Result<(), SimError> {
        let mut sim = seeded(13);
        assert_eq!(superposition(&mut sim, 0, Outcome::Zero)?, (0, 0));
        assert_eq!(entanglement(&mut sim, 0, Outcome::One)?, (0, 0, 0));
        Ok(())
    }
}
