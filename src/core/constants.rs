//! Numeric constants shared by the simulator and validation.

/// Tolerances used when comparing floating-point amplitudes.
pub mod tolerances {
    /// Squared amplitudes below this are treated as zero.
    pub const AMPLITUDE: f64 = 1e-12;
    /// Allowed deviation of the state norm from 1.0.
    pub const NORM: f64 = 1e-9;
}
