//! Builds the Bell-pair circuit by gate name, runs it, and prints the listing,
//! the wire diagram and the resulting amplitudes.
//!
//! Set `RUST_LOG=qreg=debug` (or `trace`) to see per-gate events.

use qreg::{CircuitManager, QregError, Simulator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), QregError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qreg=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let qubits = 3;
    let mut circuit = CircuitManager::with_qubit_count(qubits)?;
    circuit.add_gate("H", 0, None, None)?; // superposition on qubit 0
    circuit.add_gate("CNOT", 1, Some(0), None)?; // entangle qubit 1 with qubit 0
    circuit.add_gate("X", 2, None, None)?; // flip qubit 2

    println!("{}", circuit);
    println!("{}", circuit.diagram(qubits));

    let simulator = Simulator::new(qubits)?;
    let result = simulator.run(&mut circuit)?;
    println!("{}", result);

    for entry in result.significant_amplitudes() {
        println!(
            "|{}⟩  p = {:.4}",
            entry.label,
            entry.amplitude.norm_sqr()
        );
    }
    Ok(())
}
