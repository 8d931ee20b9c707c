// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

// Re-export public types for convenient access via `qstart::core::TypeName`
pub use error::{QubitId, SimError};
pub use state::{Outcome, StateVector};

pub mod constants;
pub use constants::tolerances;
