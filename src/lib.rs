// src/lib.rs

//! `qreg` - state-vector simulation of small quantum registers
//!
//! A register of 1 to 5 qubits is held as a vector of `2^n` complex
//! amplitudes ([`StateVector`]). Gates are applied in place by the stateless
//! [`GateEngine`], and ordered gate lists are edited and executed through a
//! [`CircuitManager`].
//!
//! Qubit `k` is bit `k` of a basis index (least significant bit first), so the
//! basis string `"01"` on two qubits means qubit 0 is `1` and qubit 1 is `0`.
//!
//! The crate logs through [`tracing`]; install a subscriber to see gate-level
//! events.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{BasisAmplitude, ErrorKind, QregError, Result, StateVector, MAX_QUBITS, MIN_QUBITS};
pub use operations::{Gate, GateKind};
pub use circuits::{CircuitBuilder, CircuitManager, CircuitStatus, ExecutionReport};
pub use simulation::{GateEngine, SimulationResult, Simulator};
pub use validation::{check_normalization, validate_state};

// Example 1: Bell state
// Builds H followed by CNOT by gate name and executes it on a two-qubit
// register in the ground state.
/// ```
/// use qreg::{CircuitManager, StateVector, QregError};
///
/// let mut state = StateVector::new(2)?;
/// let mut circuit = CircuitManager::new();
/// circuit.add_gate("H", 0, None, None)?;
/// circuit.add_gate("CNOT", 1, Some(0), None)?; // target 1, control 0
///
/// circuit.execute(&mut state)?;
/// println!("{}", circuit);
/// println!("{}", state);
///
/// let amp0 = state.amplitude(0)?;
/// let amp3 = state.amplitude(3)?;
/// assert!((amp0.re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
/// assert!((amp3.re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
/// assert_eq!(state.amplitude(1)?.norm(), 0.0);
/// assert_eq!(state.amplitude(2)?.norm(), 0.0);
/// # Ok::<(), QregError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Seeded register and inspection
// Starts from |101>, applies a Toffoli controlled by qubits 0 and 2, and lists
// the surviving basis states.
/// ```
/// use qreg::{CircuitBuilder, Gate, Simulator, QregError};
///
/// let simulator = Simulator::new(3)?.with_initial_state("101")?;
/// let mut circuit = CircuitBuilder::for_qubits(3)
///     .gate(Gate::Toffoli { control1: 0, control2: 2, target: 1 })
///     .build()?;
///
/// let result = simulator.run(&mut circuit)?;
/// println!("{}", result);
///
/// let listing = result.significant_amplitudes();
/// assert_eq!(listing.len(), 1);
/// assert_eq!(listing[0].label, "111");
/// assert_eq!(listing[0].index, 7);
/// # Ok::<(), QregError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
