// src/simulation/engine.rs
use crate::core::{FRAC_1_SQRT_2, QregError, Result, StateVector};
use crate::operations::Gate;
use num_complex::Complex;
use num_traits::Zero;

/// 2x2 unitary acting on the `{|0⟩, |1⟩}` values of one qubit.
type Matrix2 = [[Complex<f64>; 2]; 2];

/// Applies gates to a [`StateVector`] in place.
///
/// The engine holds no state: every operation takes the register explicitly.
/// Gates are applied by sweeping basis indices and pairing each index `i` with
/// its partner `i ^ (1 << q)`; no full `2^n x 2^n` matrix is ever built.
///
/// All qubit arguments are validated before the first amplitude is touched, so
/// a failed call leaves the register unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateEngine;

impl GateEngine {
    /// Applies `gate` to `state`.
    ///
    /// [`Gate::Measure`] is rejected with [`QregError::Unsupported`]: no
    /// collapse policy is defined, so the register is left as is.
    pub fn apply(state: &mut StateVector, gate: &Gate) -> Result<()> {
        match *gate {
            Gate::PauliX { target } => Self::apply_pauli_x(state, target),
            Gate::PauliY { target } => Self::apply_pauli_y(state, target),
            Gate::PauliZ { target } => Self::apply_pauli_z(state, target),
            Gate::Hadamard { target } => Self::apply_hadamard(state, target),
            Gate::Cnot { control, target } => Self::apply_cnot(state, control, target),
            Gate::Swap { qubit1, qubit2 } => Self::apply_swap(state, qubit1, qubit2),
            Gate::Toffoli { control1, control2, target } => {
                Self::apply_toffoli(state, control1, control2, target)
            }
            Gate::Measure { target } => {
                state.check_qubit(target)?;
                Err(QregError::Unsupported { gate: gate.name() })
            }
        }
    }

    /// Bit flip on `target`.
    pub fn apply_pauli_x(state: &mut StateVector, target: usize) -> Result<()> {
        state.check_qubit(target)?;
        tracing::trace!(target, "applying X");
        let mask = 1usize << target;
        let amps = state.amplitudes_mut();
        for i in 0..amps.len() {
            let partner = i ^ mask;
            if partner > i {
                amps.swap(i, partner);
            }
        }
        Ok(())
    }

    /// Pauli-Y on `target`: `|0⟩ -> i|1⟩`, `|1⟩ -> -i|0⟩`.
    pub fn apply_pauli_y(state: &mut StateVector, target: usize) -> Result<()> {
        state.check_qubit(target)?;
        tracing::trace!(target, "applying Y");
        let i = Complex::i();
        let pauli_y: Matrix2 = [[Complex::zero(), -i], [i, Complex::zero()]];
        apply_single_qubit_unitary(state, target, &pauli_y);
        Ok(())
    }

    /// Phase flip on `target`: negates every amplitude whose target bit is `1`.
    pub fn apply_pauli_z(state: &mut StateVector, target: usize) -> Result<()> {
        state.check_qubit(target)?;
        tracing::trace!(target, "applying Z");
        let mask = 1usize << target;
        for (i, amp) in state.amplitudes_mut().iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
        Ok(())
    }

    /// Hadamard on `target`.
    pub fn apply_hadamard(state: &mut StateVector, target: usize) -> Result<()> {
        state.check_qubit(target)?;
        tracing::trace!(target, "applying H");
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        let hadamard: Matrix2 = [[h, h], [h, -h]];
        apply_single_qubit_unitary(state, target, &hadamard);
        Ok(())
    }

    /// Flips `target` on every basis state whose `control` bit is `1`.
    pub fn apply_cnot(state: &mut StateVector, control: usize, target: usize) -> Result<()> {
        state.check_qubit(control)?;
        state.check_qubit(target)?;
        if control == target {
            return Err(QregError::CoincidentQubits { gate: "CNOT", qubit: target });
        }
        tracing::trace!(control, target, "applying CNOT");
        let control_mask = 1usize << control;
        let target_mask = 1usize << target;
        let amps = state.amplitudes_mut();
        for i in 0..amps.len() {
            let partner = i ^ target_mask;
            if i & control_mask != 0 && partner > i {
                amps.swap(i, partner);
            }
        }
        Ok(())
    }

    /// Exchanges the values of `qubit1` and `qubit2`.
    pub fn apply_swap(state: &mut StateVector, qubit1: usize, qubit2: usize) -> Result<()> {
        state.check_qubit(qubit1)?;
        state.check_qubit(qubit2)?;
        if qubit1 == qubit2 {
            return Err(QregError::CoincidentQubits { gate: "SWAP", qubit: qubit1 });
        }
        tracing::trace!(qubit1, qubit2, "applying SWAP");
        let mask1 = 1usize << qubit1;
        let mask2 = 1usize << qubit2;
        let amps = state.amplitudes_mut();
        for i in 0..amps.len() {
            let bits_differ = ((i & mask1) != 0) != ((i & mask2) != 0);
            let partner = i ^ mask1 ^ mask2;
            if bits_differ && partner > i {
                amps.swap(i, partner);
            }
        }
        Ok(())
    }

    /// Flips `target` on every basis state where both controls are `1`.
    pub fn apply_toffoli(
        state: &mut StateVector,
        control1: usize,
        control2: usize,
        target: usize,
    ) -> Result<()> {
        for qubit in [control1, control2, target] {
            state.check_qubit(qubit)?;
        }
        if control1 == control2 || control1 == target {
            return Err(QregError::CoincidentQubits { gate: "TOFFOLI", qubit: control1 });
        }
        if control2 == target {
            return Err(QregError::CoincidentQubits { gate: "TOFFOLI", qubit: control2 });
        }
        tracing::trace!(control1, control2, target, "applying TOFFOLI");
        let controls = (1usize << control1) | (1usize << control2);
        let target_mask = 1usize << target;
        let amps = state.amplitudes_mut();
        for i in 0..amps.len() {
            let partner = i ^ target_mask;
            if i & controls == controls && partner > i {
                amps.swap(i, partner);
            }
        }
        Ok(())
    }
}

/// Applies a 2x2 matrix to `target` across the whole register.
///
/// Each output pair depends on both inputs of the pair, so results are written
/// to a staging buffer that replaces the vector once every pair is done.
/// `target` must already be validated.
fn apply_single_qubit_unitary(state: &mut StateVector, target: usize, matrix: &Matrix2) {
    let mask = 1usize << target;
    let amps = state.amplitudes();
    let mut new_vec = vec![Complex::zero(); amps.len()];

    for i0 in (0..amps.len()).filter(|i| i & mask == 0) {
        let i1 = i0 | mask;
        let psi_0 = amps[i0];
        let psi_1 = amps[i1];
        new_vec[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
        new_vec[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
    }

    state.replace_amplitudes(new_vec);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorKind, MAX_QUBITS};
    use num_traits::One;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn one() -> Complex<f64> {
        Complex::one()
    }

    /// Asserts that two complex state vectors are approximately equal component-wise.
    fn assert_complex_vec_approx_equal(
        actual: &[Complex<f64>],
        expected: &[Complex<f64>],
        context: &str,
    ) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).norm() < TEST_TOLERANCE,
                "Mismatch at index {} - {}: actual {}, expected {}",
                i,
                context,
                a,
                e
            );
        }
    }

    /// A 3-qubit state with a distinct amplitude on every basis index.
    fn ramp_state() -> StateVector {
        let raw: Vec<Complex<f64>> =
            (0..8).map(|k| Complex::new(k as f64 + 1.0, -(k as f64) * 0.5)).collect();
        let mut state = StateVector::from_amplitudes(3, raw).expect("valid dimension");
        state.normalize().expect("non-zero norm");
        state
    }

    #[test]
    fn pauli_x_flips_ground_state() -> Result<()> {
        let mut state = StateVector::new(1)?;
        GateEngine::apply_pauli_x(&mut state, 0)?;
        assert_complex_vec_approx_equal(state.amplitudes(), &[Complex::zero(), one()], "X|0>");
        Ok(())
    }

    #[test]
    fn pauli_y_maps_zero_to_i_one() -> Result<()> {
        let mut state = StateVector::new(2)?;
        GateEngine::apply_pauli_y(&mut state, 0)?;
        assert_eq!(state.amplitude(1)?, Complex::new(0.0, 1.0));
        assert_eq!(state.amplitude(0)?, Complex::zero());

        let mut state = StateVector::new(1)?;
        state.set_basis_state("1")?;
        GateEngine::apply_pauli_y(&mut state, 0)?;
        assert_eq!(state.amplitude(0)?, Complex::new(0.0, -1.0));
        Ok(())
    }

    #[test]
    fn pauli_z_negates_one_component() -> Result<()> {
        let mut state = StateVector::new(2)?;
        GateEngine::apply_pauli_x(&mut state, 0)?;
        GateEngine::apply_pauli_z(&mut state, 0)?;
        assert_eq!(state.amplitude(1)?, Complex::new(-1.0, 0.0));

        // Z leaves |0> alone.
        let mut ground = StateVector::new(2)?;
        GateEngine::apply_pauli_z(&mut ground, 1)?;
        assert_eq!(ground, StateVector::new(2)?);
        Ok(())
    }

    #[test]
    fn hadamard_creates_equal_superposition() -> Result<()> {
        let mut state = StateVector::new(3)?;
        GateEngine::apply_hadamard(&mut state, 1)?;
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        let mut expected = vec![Complex::zero(); 8];
        expected[0] = h;
        expected[2] = h;
        assert_complex_vec_approx_equal(state.amplitudes(), &expected, "H on qubit 1");

        let mut minus = StateVector::new(1)?;
        minus.set_basis_state("1")?;
        GateEngine::apply_hadamard(&mut minus, 0)?;
        assert_complex_vec_approx_equal(minus.amplitudes(), &[h, -h], "H|1>");
        Ok(())
    }

    #[test]
    fn involutions_restore_the_state() -> Result<()> {
        let original = ramp_state();
        for q in 0..3 {
            let mut state = original.clone();
            GateEngine::apply_pauli_x(&mut state, q)?;
            GateEngine::apply_pauli_x(&mut state, q)?;
            assert_eq!(state, original, "XX on qubit {}", q);

            let mut state = original.clone();
            GateEngine::apply_hadamard(&mut state, q)?;
            GateEngine::apply_hadamard(&mut state, q)?;
            assert_complex_vec_approx_equal(state.amplitudes(), original.amplitudes(), "HH");

            GateEngine::apply_pauli_y(&mut state, q)?;
            GateEngine::apply_pauli_y(&mut state, q)?;
            assert_complex_vec_approx_equal(state.amplitudes(), original.amplitudes(), "YY");
        }
        let mut state = original.clone();
        GateEngine::apply_swap(&mut state, 0, 2)?;
        GateEngine::apply_swap(&mut state, 2, 0)?;
        assert_eq!(state, original);
        Ok(())
    }

    #[test]
    fn cnot_only_acts_when_control_is_set() -> Result<()> {
        let mut state = StateVector::new(2)?;
        GateEngine::apply_cnot(&mut state, 0, 1)?;
        assert_eq!(state, StateVector::new(2)?, "control 0 leaves |00> unchanged");

        state.set_basis_state("01")?; // qubit 0 = 1
        GateEngine::apply_cnot(&mut state, 0, 1)?;
        assert_eq!(state.amplitude(3)?, one());
        Ok(())
    }

    #[test]
    fn swap_exchanges_qubit_values() -> Result<()> {
        let mut state = StateVector::new(2)?;
        GateEngine::apply_pauli_x(&mut state, 0)?; // |q1 q0> = |01>, index 1
        GateEngine::apply_swap(&mut state, 0, 1)?;
        assert_eq!(state.amplitude(2)?, one());
        assert_eq!(state.amplitude(1)?, Complex::zero());
        Ok(())
    }

    #[test]
    fn toffoli_truth_table() -> Result<()> {
        // Controls on qubits 0 and 2, target on qubit 1.
        for index in 0..8usize {
            let mut state = StateVector::new(3)?;
            let label = state.basis_label(index);
            state.set_basis_state(&label)?;
            GateEngine::apply_toffoli(&mut state, 0, 2, 1)?;

            let both_set = index & 0b101 == 0b101;
            let expected = if both_set { index ^ 0b010 } else { index };
            assert_eq!(state.amplitude(expected)?, one(), "input |{:03b}>", index);
        }
        Ok(())
    }

    #[test]
    fn out_of_range_qubits_are_rejected_before_mutation() -> Result<()> {
        let original = ramp_state();
        let mut state = original.clone();

        let err = GateEngine::apply_pauli_x(&mut state, 5).unwrap_err();
        assert_eq!(err, QregError::QubitOutOfRange { index: 5, qubits: 3 });
        assert_eq!(err.kind(), ErrorKind::Range);

        assert!(GateEngine::apply_hadamard(&mut state, MAX_QUBITS).is_err());
        assert!(GateEngine::apply_cnot(&mut state, 3, 0).is_err());
        assert!(GateEngine::apply_toffoli(&mut state, 0, 1, 4).is_err());
        assert_eq!(state, original);
        Ok(())
    }

    #[test]
    fn coincident_qubits_are_invalid_arguments() -> Result<()> {
        let mut state = StateVector::new(3)?;
        let errors = [
            GateEngine::apply_cnot(&mut state, 1, 1).unwrap_err(),
            GateEngine::apply_swap(&mut state, 2, 2).unwrap_err(),
            GateEngine::apply_toffoli(&mut state, 0, 0, 1).unwrap_err(),
            GateEngine::apply_toffoli(&mut state, 0, 1, 1).unwrap_err(),
            GateEngine::apply_toffoli(&mut state, 2, 1, 2).unwrap_err(),
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{}", err);
        }
        assert_eq!(state, StateVector::new(3)?);
        Ok(())
    }

    #[test]
    fn measure_is_unsupported_and_leaves_state() -> Result<()> {
        let mut state = StateVector::new(2)?;
        GateEngine::apply_hadamard(&mut state, 0)?;
        let before = state.clone();

        let err = GateEngine::apply(&mut state, &Gate::Measure { target: 0 }).unwrap_err();
        assert_eq!(err, QregError::Unsupported { gate: "MEASURE" });
        assert_eq!(state, before);

        let err = GateEngine::apply(&mut state, &Gate::Measure { target: 4 }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        Ok(())
    }

    #[test]
    fn dispatch_matches_direct_calls() -> Result<()> {
        let gates = [
            Gate::Hadamard { target: 0 },
            Gate::Cnot { control: 0, target: 1 },
            Gate::PauliY { target: 2 },
            Gate::Toffoli { control1: 0, control2: 1, target: 2 },
            Gate::Swap { qubit1: 0, qubit2: 2 },
            Gate::PauliZ { target: 1 },
        ];
        let mut via_apply = StateVector::new(3)?;
        for gate in &gates {
            GateEngine::apply(&mut via_apply, gate)?;
        }

        let mut direct = StateVector::new(3)?;
        GateEngine::apply_hadamard(&mut direct, 0)?;
        GateEngine::apply_cnot(&mut direct, 0, 1)?;
        GateEngine::apply_pauli_y(&mut direct, 2)?;
        GateEngine::apply_toffoli(&mut direct, 0, 1, 2)?;
        GateEngine::apply_swap(&mut direct, 0, 2)?;
        GateEngine::apply_pauli_z(&mut direct, 1)?;

        assert_eq!(via_apply, direct);
        assert!((via_apply.total_probability() - 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }
}
