// src/main.rs

//! Quick-start entry point. Diagnostics go to stderr through `RUST_LOG`.

use qstart::{Driver, DriverError, KeyPress, QuantumSimulator};

fn main() -> Result<(), DriverError> {
    env_logger::init();

    let mut driver = Driver::new(std::io::stdout(), KeyPress);
    driver.run(QuantumSimulator::new)
}
