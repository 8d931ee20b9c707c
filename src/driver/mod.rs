// src/driver/mod.rs

//! The quick-start driver: three stages, each on a fresh simulator
//! session, separated by keypress prompts.
//!
//! 1. hello world (no statistics)
//! 2. superposition, one line of `(zeros, ones)` per initial value
//! 3. entanglement, one line of `(zeros, ones, agree)` per initial value
//!
//! Everything runs in a single thread and every call blocks. The first
//! failure aborts the run and is returned to the caller.

mod prompt;

pub use prompt::{Acknowledge, KeyPress};

use crate::core::{Outcome, SimError};
use crate::programs::QuantumBackend;
use log::{debug, info};
use std::fmt;
use std::io::{self, Write};

/// Repetitions per sampler call.
pub const DEFAULT_REPETITIONS: u64 = 1000;

/// Prompt printed before every wait.
pub const CONTINUE_PROMPT: &str = "Press any key to continue...";

/// Settings for a [`Driver`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Repetitions passed to both samplers.
    pub repetitions: u64,
    /// Initial values, in the order they are run.
    pub initials: [Outcome; 2],
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            initials: Outcome::ALL,
        }
    }
}

/// Failure of a driver run.
#[derive(Debug)]
pub enum DriverError {
    /// An operation or the simulator failed.
    Simulation(SimError),
    /// Writing output or waiting for input failed.
    Console(io::Error),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Simulation(e) => write!(f, "simulation failed: {}", e),
            DriverError::Console(e) => write!(f, "console I/O failed: {}", e),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Simulation(e) => Some(e),
            DriverError::Console(e) => Some(e),
        }
    }
}

impl From<SimError> for DriverError {
    fn from(e: SimError) -> Self {
        DriverError::Simulation(e)
    }
}

impl From<io::Error> for DriverError {
    fn from(e: io::Error) -> Self {
        DriverError::Console(e)
    }
}

/// Formats one superposition result line.
pub fn format_superposition(initial: Outcome, zeros: u64, ones: u64) -> String {
    format!("Init:{:<4} 0s={:<4} 1s={:<4}", initial, zeros, ones)
}

/// Formats one entanglement result line.
pub fn format_entanglement(initial: Outcome, zeros: u64, ones: u64, agree: u64) -> String {
    format!("Init:{:<4} 0s={:<4} 1s={:<4} agree={:<4}", initial, zeros, ones, agree)
}

/// Sequences the three tutorial stages.
///
/// # Examples
///
/// ```no_run
/// use qstart::{Driver, KeyPress, QuantumSimulator};
///
/// let mut driver = Driver::new(std::io::stdout(), KeyPress);
/// driver.run(QuantumSimulator::new).expect("quick-start run failed");
/// ```
pub struct Driver<W, A> {
    out: W,
    ack: A,
    config: DriverConfig,
}

impl<W: Write, A: Acknowledge> Driver<W, A> {
    /// A driver with the default configuration.
    pub fn new(out: W, ack: A) -> Self {
        Self::with_config(out, ack, DriverConfig::default())
    }

    pub fn with_config(out: W, ack: A, config: DriverConfig) -> Self {
        Self { out, ack, config }
    }

    /// Gives back the output sink and acknowledger.
    pub fn into_parts(self) -> (W, A) {
        (self.out, self.ack)
    }

    /// Runs all stages. `session` is called once per stage for a fresh
    /// backend, which is dropped when the stage ends.
    pub fn run<B, F>(&mut self, mut session: F) -> Result<(), DriverError>
    where
        B: QuantumBackend,
        F: FnMut() -> B,
    {
        self.hello_stage(&mut session)?;
        self.pause(Some("Superposition"))?;
        self.superposition_stage(&mut session)?;
        self.pause(Some("Entanglement"))?;
        self.entanglement_stage(&mut session)?;
        self.pause(None)?;
        info!("quick-start run complete");
        Ok(())
    }

    fn hello_stage<B, F>(&mut self, session: &mut F) -> Result<(), DriverError>
    where
        B: QuantumBackend,
        F: FnMut() -> B,
    {
        debug!("stage 1: hello");
        let mut sim = session();
        sim.hello()?;
        Ok(())
    }

    fn superposition_stage<B, F>(&mut self, session: &mut F) -> Result<(), DriverError>
    where
        B: QuantumBackend,
        F: FnMut() -> B,
    {
        debug!("stage 2: superposition ({} repetitions)", self.config.repetitions);
        let mut sim = session();
        for initial in self.config.initials {
            let (zeros, ones) = sim.superposition(self.config.repetitions, initial)?;
            writeln!(self.out, "{}", format_superposition(initial, zeros, ones))?;
        }
        Ok(())
    }

    fn entanglement_stage<B, F>(&mut self, session: &mut F) -> Result<(), DriverError>
    where
        B: QuantumBackend,
        F: FnMut() -> B,
    {
        debug!("stage 3: entanglement ({} repetitions)", self.config.repetitions);
        let mut sim = session();
        for initial in self.config.initials {
            let (zeros, ones, agree) = sim.entanglement(self.config.repetitions, initial)?;
            writeln!(self.out, "{}", format_entanglement(initial, zeros, ones, agree))?;
        }
        Ok(())
    }

    /// Prints the prompts and blocks until acknowledged.
    fn pause(&mut self, next_up: Option<&str>) -> Result<(), DriverError> {
        writeln!(self.out, "{}", CONTINUE_PROMPT)?;
        if let Some(stage) = next_up {
            writeln!(self.out, "Next up: {}: ", stage)?;
        }
        self.out.flush()?;
        self.ack.acknowledge()?;
        Ok(())
    }
}
