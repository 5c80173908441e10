// src/simulation/mod.rs

//! Runs circuits against freshly prepared registers.
//!
//! [`GateEngine`] applies individual gates; [`Simulator`] prepares a register
//! in a chosen basis state, executes a whole [`CircuitManager`] against it and
//! packages the before/after states into a [`SimulationResult`].

mod results;
pub mod engine;

pub use engine::GateEngine;
pub use results::SimulationResult;

use crate::circuits::CircuitManager;
use crate::core::state::check_qubit_count;
use crate::core::{DISPLAY_THRESHOLD, QregError, Result, StateVector};
use tracing::{info, warn};

/// Prepares a register and runs circuits on it.
///
/// Every [`run`](Self::run) starts from a new register seeded with the
/// configured initial basis state (the ground state unless overridden), so
/// repeated runs are independent of each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulator {
    qubit_count: usize,
    initial_state: Option<String>,
    display_threshold: f64,
}

impl Simulator {
    /// Creates a simulator for `qubit_count` qubits.
    pub fn new(qubit_count: usize) -> Result<Self> {
        check_qubit_count(qubit_count)?;
        Ok(Self {
            qubit_count,
            initial_state: None,
            display_threshold: DISPLAY_THRESHOLD,
        })
    }

    /// Seeds every run with the basis state spelled by `bits` (big-endian).
    /// The string is validated immediately.
    pub fn with_initial_state(mut self, bits: &str) -> Result<Self> {
        StateVector::new(self.qubit_count)?.set_basis_state(bits)?;
        self.initial_state = Some(bits.to_string());
        Ok(self)
    }

    /// Overrides the magnitude below which amplitudes are left out of listings.
    ///
    /// The threshold must be finite and non-negative.
    pub fn with_display_threshold(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(QregError::InvalidThreshold {
                value: threshold.to_string(),
            });
        }
        self.display_threshold = threshold;
        Ok(self)
    }

    /// Register size.
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// The register every run starts from.
    pub fn prepare(&self) -> Result<StateVector> {
        let mut state = StateVector::new(self.qubit_count)?;
        if let Some(bits) = &self.initial_state {
            state.set_basis_state(bits)?;
        }
        Ok(state)
    }

    /// Executes `circuit` on a freshly prepared register.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with the initial and final registers.
    /// * `Err(QregError)` from the first gate that failed.
    pub fn run(&self, circuit: &mut CircuitManager) -> Result<SimulationResult> {
        let initial_state = self.prepare()?;
        let mut final_state = initial_state.clone();
        info!(
            qubits = self.qubit_count,
            gates = circuit.len(),
            initial = self.initial_state.as_deref().unwrap_or("ground"),
            "simulation started"
        );

        let report = circuit.execute(&mut final_state).inspect_err(|err| {
            warn!(error = %err, "simulation failed");
        })?;

        info!(gates_applied = report.gates_applied, "simulation finished");
        Ok(SimulationResult::new(
            initial_state,
            final_state,
            report,
            self.display_threshold,
        ))
    }
}
