// src/simulation/results.rs
use crate::circuits::ExecutionReport;
use crate::core::{BasisAmplitude, StateVector};
use std::fmt;

/// Holds the results of a circuit simulation: the register before and after
/// the run, and the execution report.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    initial_state: StateVector,
    final_state: StateVector,
    report: ExecutionReport,
    display_threshold: f64,
}

impl SimulationResult {
    /// Creates a result set. (Internal visibility)
    pub(crate) fn new(
        initial_state: StateVector,
        final_state: StateVector,
        report: ExecutionReport,
        display_threshold: f64,
    ) -> Self {
        Self {
            initial_state,
            final_state,
            report,
            display_threshold,
        }
    }

    /// The register the circuit started from.
    pub fn initial_state(&self) -> &StateVector {
        &self.initial_state
    }

    /// The register after every gate was applied.
    pub fn final_state(&self) -> &StateVector {
        &self.final_state
    }

    /// Consumes the result, returning the final register.
    pub fn into_final_state(self) -> StateVector {
        self.final_state
    }

    /// Execution details.
    pub fn report(&self) -> &ExecutionReport {
        &self.report
    }

    /// Non-negligible amplitudes of the final register, with their bit patterns.
    pub fn significant_amplitudes(&self) -> Vec<BasisAmplitude> {
        self.final_state.significant_amplitudes(Some(self.display_threshold))
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        writeln!(f, "  Gates applied: {}", self.report.gates_applied)?;
        writeln!(f, "  Initial state:")?;
        write_amplitudes(f, &self.initial_state.significant_amplitudes(Some(self.display_threshold)))?;
        writeln!(f, "  Final state:")?;
        write_amplitudes(f, &self.significant_amplitudes())
    }
}

fn write_amplitudes(f: &mut fmt::Formatter<'_>, entries: &[BasisAmplitude]) -> fmt::Result {
    if entries.is_empty() {
        return writeln!(f, "    No states above threshold");
    }
    for entry in entries {
        writeln!(
            f,
            "    |{}⟩ : ({:.6}, {:.6})",
            entry.label, entry.amplitude.re, entry.amplitude.im
        )?;
    }
    Ok(())
}
