// src/lib.rs

//! `qstart` - a quick-start quantum driver
//!
//! Runs three small programs on a state-vector simulator and prints their
//! measurement statistics: a hello-world operation, a superposition sampler
//! and an entanglement sampler.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod programs;
pub mod driver;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{Outcome, QubitId, SimError, StateVector};
pub use crate::operations::Gate;
pub use crate::circuits::{Circuit, CircuitBuilder};
pub use crate::simulation::{QuantumSimulator, SimulatorConfig};
pub use crate::programs::QuantumBackend;
pub use crate::driver::{Acknowledge, Driver, DriverConfig, DriverError, KeyPress};
pub use crate::validation::{check_normalization, validate_state};

// Example: Superposition statistics
// One qubit is prepared in each initial value, put through H and measured;
// both initial values give a roughly even split.
/// ```
/// use qstart::{Outcome, QuantumBackend, QuantumSimulator, SimError, SimulatorConfig};
///
/// # fn main() -> Result<(), SimError> {
/// let mut sim = QuantumSimulator::with_config(SimulatorConfig::seeded(42));
/// for initial in Outcome::ALL {
///     let (zeros, ones) = sim.superposition(1000, initial)?;
///     assert_eq!(zeros + ones, 1000);
///     assert!(zeros > 400 && ones > 400);
/// }
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();

// Example: Entanglement statistics
// A Bell pair always measures the same on both halves.
/// ```
/// use qstart::{Outcome, QuantumBackend, QuantumSimulator, SimError, SimulatorConfig};
///
/// # fn main() -> Result<(), SimError> {
/// let mut sim = QuantumSimulator::with_config(SimulatorConfig::seeded(42));
/// let (zeros, ones, agree) = sim.entanglement(1000, Outcome::One)?;
/// assert_eq!(zeros + ones, 1000);
/// assert_eq!(agree, 1000);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();
