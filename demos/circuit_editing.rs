//! Edits a circuit the way an interactive front end would: gates are added
//! by name, moved and removed, and the register is re-seeded between runs.
//! Rejected edits are reported and the circuit stays as it was.

use qreg::{CircuitManager, QregError, Simulator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn show(circuit: &CircuitManager) {
    println!("{}", circuit.summary());
    for (i, label) in circuit.descriptions().iter().enumerate() {
        println!("  [{}] {}", i, label);
    }
}

fn main() -> Result<(), QregError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qreg=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let qubits = 3;
    let mut circuit = CircuitManager::with_qubit_count(qubits)?;
    circuit.add_gate("Pauli-X", 0, None, None)?;
    circuit.add_gate("toffoli", 2, Some(0), Some(1))?;
    circuit.add_gate("x", 1, None, None)?;
    show(&circuit);

    // Each of these is rejected without touching the circuit.
    let rejected = [
        circuit.add_gate("H", -1, None, None),
        circuit.add_gate("Fredkin", 0, None, None),
        circuit.add_gate("CNOT", 1, Some(1), None),
        circuit.add_gate("Z", 3, None, None),
    ];
    for err in rejected.into_iter().filter_map(Result::err) {
        println!("rejected ({:?}): {}", err.kind(), err);
    }

    let simulator = Simulator::new(qubits)?.with_initial_state("000")?;
    println!("{}", simulator.run(&mut circuit)?);

    // Move the last X in front of the Toffoli so both controls are set.
    circuit.reorder_gates(2, 1)?;
    show(&circuit);
    println!("{}", simulator.run(&mut circuit)?);

    let removed = circuit.remove_gate(0)?;
    println!("removed {}", removed);
    show(&circuit);

    let seeded = simulator.with_initial_state("001")?;
    println!("{}", seeded.run(&mut circuit)?);
    Ok(())
}
