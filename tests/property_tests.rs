// tests/property_tests.rs

// Randomized checks over seeded gate sequences. Seeds are fixed so failures
// reproduce.

use qreg::{
    check_normalization, CircuitManager, Gate, GateEngine, QregError, StateVector, MAX_QUBITS,
    MIN_QUBITS,
};
use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOLERANCE: f64 = 1e-9;

/// Picks `k` distinct qubits out of `n`.
fn distinct_qubits(rng: &mut StdRng, n: usize, k: usize) -> Vec<usize> {
    let mut picked = Vec::with_capacity(k);
    while picked.len() < k {
        let q = rng.random_range(0..n);
        if !picked.contains(&q) {
            picked.push(q);
        }
    }
    picked
}

/// A random unitary gate that fits an `n`-qubit register.
fn random_gate(rng: &mut StdRng, n: usize) -> Gate {
    let max_kind = match n {
        1 => 4,
        2 => 6,
        _ => 7,
    };
    match rng.random_range(0..max_kind) {
        0 => Gate::PauliX { target: rng.random_range(0..n) },
        1 => Gate::PauliY { target: rng.random_range(0..n) },
        2 => Gate::PauliZ { target: rng.random_range(0..n) },
        3 => Gate::Hadamard { target: rng.random_range(0..n) },
        4 => {
            let q = distinct_qubits(rng, n, 2);
            Gate::Cnot { control: q[0], target: q[1] }
        }
        5 => {
            let q = distinct_qubits(rng, n, 2);
            Gate::Swap { qubit1: q[0], qubit2: q[1] }
        }
        _ => {
            let q = distinct_qubits(rng, n, 3);
            Gate::Toffoli { control1: q[0], control2: q[1], target: q[2] }
        }
    }
}

/// A normalized state with non-zero amplitude on every basis index.
fn random_state(rng: &mut StdRng, n: usize) -> StateVector {
    let amps = (0..1usize << n)
        .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect();
    let mut state = StateVector::from_amplitudes(n, amps).expect("dimension matches");
    state.normalize().expect("non-zero norm");
    state
}

fn assert_states_close(actual: &StateVector, expected: &StateVector, context: &str) {
    for (i, (a, e)) in actual.amplitudes().iter().zip(expected.amplitudes()).enumerate() {
        assert!((a - e).norm() < TOLERANCE, "{}: index {} differs ({} vs {})", context, i, a, e);
    }
}

#[test]
fn random_circuits_preserve_the_norm() -> Result<(), QregError> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for n in MIN_QUBITS..=MAX_QUBITS {
        for _ in 0..20 {
            let mut circuit = CircuitManager::with_qubit_count(n)?;
            for _ in 0..rng.random_range(1..40) {
                circuit.push(random_gate(&mut rng, n))?;
            }
            let mut state = StateVector::new(n)?;
            circuit.execute(&mut state)?;
            check_normalization(&state, Some(1e-6))?;

            let mut arbitrary = random_state(&mut rng, n);
            circuit.execute(&mut arbitrary)?;
            check_normalization(&arbitrary, Some(1e-6))?;
        }
    }
    Ok(())
}

#[test]
fn self_inverse_gates_undo_themselves() -> Result<(), QregError> {
    let mut rng = StdRng::seed_from_u64(42);
    for n in MIN_QUBITS..=MAX_QUBITS {
        for _ in 0..25 {
            let original = random_state(&mut rng, n);
            // Every gate in the set is its own inverse.
            let gate = random_gate(&mut rng, n);
            let mut state = original.clone();
            GateEngine::apply(&mut state, &gate)?;
            GateEngine::apply(&mut state, &gate)?;
            assert_states_close(&state, &original, &gate.to_string());
        }
    }
    Ok(())
}

#[test]
fn permutation_gates_are_exact() -> Result<(), QregError> {
    let mut rng = StdRng::seed_from_u64(7);
    let n = 4;
    for _ in 0..50 {
        let original = random_state(&mut rng, n);
        let q = distinct_qubits(&mut rng, n, 3);

        let mut state = original.clone();
        GateEngine::apply_pauli_x(&mut state, q[0])?;
        GateEngine::apply_pauli_x(&mut state, q[0])?;
        assert_eq!(state, original);

        GateEngine::apply_swap(&mut state, q[0], q[1])?;
        GateEngine::apply_swap(&mut state, q[0], q[1])?;
        assert_eq!(state, original);

        GateEngine::apply_toffoli(&mut state, q[0], q[1], q[2])?;
        GateEngine::apply_toffoli(&mut state, q[0], q[1], q[2])?;
        assert_eq!(state, original);
    }
    Ok(())
}

#[test]
fn toffoli_flips_target_only_under_both_controls() -> Result<(), QregError> {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..30 {
        let n = rng.random_range(3..=MAX_QUBITS);
        let q = distinct_qubits(&mut rng, n, 3);
        let original = random_state(&mut rng, n);

        let mut state = original.clone();
        GateEngine::apply_toffoli(&mut state, q[0], q[1], q[2])?;

        let controls = (1 << q[0]) | (1 << q[1]);
        for index in 0..state.dimension() {
            let source = if index & controls == controls { index ^ (1 << q[2]) } else { index };
            assert_eq!(state.amplitude(index)?, original.amplitude(source)?);
        }
    }
    Ok(())
}

#[test]
fn swap_matches_three_cnots() -> Result<(), QregError> {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..30 {
        let n = rng.random_range(2..=MAX_QUBITS);
        let q = distinct_qubits(&mut rng, n, 2);
        let original = random_state(&mut rng, n);

        let mut swapped = original.clone();
        GateEngine::apply_swap(&mut swapped, q[0], q[1])?;

        let mut via_cnots = original.clone();
        GateEngine::apply_cnot(&mut via_cnots, q[0], q[1])?;
        GateEngine::apply_cnot(&mut via_cnots, q[1], q[0])?;
        GateEngine::apply_cnot(&mut via_cnots, q[0], q[1])?;

        assert_eq!(swapped, via_cnots);
    }
    Ok(())
}

#[test]
fn basis_labels_round_trip_through_set_basis_state() -> Result<(), QregError> {
    for n in MIN_QUBITS..=MAX_QUBITS {
        let mut state = StateVector::new(n)?;
        for index in 0..state.dimension() {
            let label = state.basis_label(index);
            state.set_basis_state(&label)?;
            assert_eq!(state.significant_amplitudes(None)[0].index, index);
            assert_eq!(state.probability(index)?, 1.0);
        }
    }
    Ok(())
}
