// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Amplitude vector of the simulated register.
///
/// For `n` qubits the vector has `2^n` entries. Basis index bits are
/// big-endian with respect to register position: the qubit at position 0
/// owns the most significant bit, the last allocated qubit the least
/// significant one.
#[derive(Debug, Clone, PartialEq)] // no Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Wraps a raw amplitude vector. The caller is responsible for
    /// normalisation and a power-of-two length.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// The zero-qubit state: a single amplitude of 1.
    pub(crate) fn vacuum() -> Self {
        Self::new(vec![Complex::new(1.0, 0.0)])
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states represented.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Appends one qubit in `|0>` on the least significant end (`|psi> ⊗ |0>`).
    pub(crate) fn extend_with_zero(&mut self) {
        let mut grown = vec![Complex::zero(); self.amplitudes.len() * 2];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            grown[i << 1] = *amp;
        }
        self.amplitudes = grown;
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// Result of a Z-basis measurement, also used as the requested initial
/// value for the tutorial programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Zero,
    One,
}

impl Outcome {
    /// Both outcomes, in the order the driver walks them.
    pub const ALL: [Outcome; 2] = [Outcome::Zero, Outcome::One];

    /// Builds the outcome corresponding to a basis bit.
    pub fn from_bit(bit: usize) -> Self {
        if bit & 1 == 0 { Outcome::Zero } else { Outcome::One }
    }

    /// The basis bit of this outcome.
    pub fn bit(self) -> usize {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

impl fmt::Display for Outcome {
    // `pad` so that width and alignment flags like `{:<4}` apply.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Zero => f.pad("Zero"),
            Outcome::One => f.pad("One"),
        }
    }
}
