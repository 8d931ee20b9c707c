// src/circuits/mod.rs

//! Ordered gate sequences and a builder for them.

use crate::core::QubitId;
use crate::operations::Gate;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An ordered sequence of gates over a set of qubits.
///
/// A circuit only names qubits; it does not own them. The qubits must be
/// allocated on the simulator before [`QuantumSimulator::run`](crate::QuantumSimulator::run)
/// is called with the circuit.
#[derive(Clone, PartialEq, Default)]
pub struct Circuit {
    qubits: HashSet<QubitId>,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a gate, registering the qubits it touches.
    pub fn add_gate(&mut self, gate: Gate) {
        self.qubits.extend(gate.involved_qubits());
        self.gates.push(gate);
    }

    /// Appends gates from an iterator, in order.
    pub fn add_gates<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self.add_gate(gate);
        }
    }

    /// The unique set of qubits touched by this circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// The gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

/// Method-chaining builder for [`Circuit`].
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single gate to the circuit being built.
    pub fn add_gate(mut self, gate: Gate) -> Self {
        self.circuit.add_gate(gate);
        self
    }

    /// Adds several gates to the circuit being built.
    pub fn add_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.circuit.add_gates(gates);
        self
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gates.is_empty() {
            return writeln!(f, "Circuit[0 gates on 0 qubits]");
        }

        let num_gates = self.gates.len();
        let mut sorted_qubits: Vec<QubitId> = self.qubits.iter().copied().collect();
        sorted_qubits.sort();
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> =
            sorted_qubits.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let label_width = sorted_qubits.iter().map(|q| q.to_string().len()).max().unwrap_or(0) + 2;

        const GATE_WIDTH: usize = 5; // e.g. "──H──"
        const WIRE: &str = "─────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                return symbol.chars().take(GATE_WIDTH).collect();
            }
            let pre = (GATE_WIDTH - slen) / 2;
            let post = GATE_WIDTH - slen - pre;
            format!("{}{}{}", H_WIRE.to_string().repeat(pre), symbol, H_WIRE.to_string().repeat(post))
        }

        // grid[row][t] is the segment drawn on a qubit wire at time t,
        // v_connect[row][t] the connector drawn below that wire.
        let mut grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_gates]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_gates]; num_qubits];

        for (t, gate) in self.gates.iter().enumerate() {
            match gate {
                Gate::Cnot { control, target } | Gate::Cz { control, target } => {
                    let (Some(&r_ctrl), Some(&r_tgt)) = (qubit_to_row.get(control), qubit_to_row.get(target)) else {
                        continue;
                    };
                    grid[r_ctrl][t] = format_gate("@");
                    grid[r_tgt][t] = format_gate(gate.symbol());
                    let (r_min, r_max) = (r_ctrl.min(r_tgt), r_ctrl.max(r_tgt));
                    for row in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row[t] = V_WIRE;
                    }
                }
                single => {
                    for q in single.involved_qubits() {
                        if let Some(&r) = qubit_to_row.get(&q) {
                            grid[r][t] = format_gate(single.symbol());
                        }
                    }
                }
            }
        }

        writeln!(f, "Circuit[{} gates on {} qubits]", num_gates, num_qubits)?;
        for r in 0..num_qubits {
            write!(f, "{:<width$}", format!("{}: ", sorted_qubits[r]), width = label_width)?;
            writeln!(f, "{}", grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", " ".repeat(label_width))?;
                for t in 0..num_gates {
                    let pre = (GATE_WIDTH - 1) / 2;
                    let post = GATE_WIDTH - 1 - pre;
                    write!(f, "{}{}{}", " ".repeat(pre), v_connect[r][t], " ".repeat(post))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_tracks_qubits_and_order() {
        let (q0, q1) = (QubitId(0), QubitId(1));
        let circuit = CircuitBuilder::new()
            .add_gate(Gate::H(q0))
            .add_gate(Gate::Cnot { control: q0, target: q1 })
            .build();

        assert_eq!(circuit.len(), 2);
        assert!(circuit.qubits().contains(&q0) && circuit.qubits().contains(&q1));
        assert_eq!(circuit.gates()[0], Gate::H(q0));
    }

    #[test]
    fn test_display_bell_diagram() {
        let (q0, q1) = (QubitId(0), QubitId(1));
        let circuit = CircuitBuilder::new()
            .add_gates([Gate::H(q0), Gate::Cnot { control: q0, target: q1 }])
            .build();

        let expected = [
            "Circuit[2 gates on 2 qubits]",
            "q0: ──H────@──",
            format!("{}│  ", " ".repeat(11)).as_str(),
            "q1: ───────X──",
        ]
        .join("\n")
            + "\n";
        assert_eq!(circuit.to_string(), expected);
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(Circuit::new().to_string(), "Circuit[0 gates on 0 qubits]\n");
    }
}
