// src/operations/mod.rs

//! Gate descriptors: the entries a circuit is made of.
//!
//! A [`Gate`] names one unitary transformation (or a measurement request)
//! together with exactly the qubit slots that transformation needs. Gates are
//! immutable values; the [`GateEngine`](crate::simulation::GateEngine) gives them
//! their effect on a [`StateVector`](crate::core::StateVector).

use crate::core::{QregError, Result};
use std::fmt;
use std::str::FromStr;

/// The kind of a gate, without its qubit arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// Bit flip.
    PauliX,
    /// Bit and phase flip.
    PauliY,
    /// Phase flip.
    PauliZ,
    /// Equal superposition of the two target values.
    Hadamard,
    /// Controlled NOT.
    Cnot,
    /// Exchange of two qubits.
    Swap,
    /// Doubly controlled NOT.
    Toffoli,
    /// Projective measurement request.
    Measure,
}

impl GateKind {
    /// Every kind, in canonical order.
    pub const ALL: [GateKind; 8] = [
        GateKind::PauliX,
        GateKind::PauliY,
        GateKind::PauliZ,
        GateKind::Hadamard,
        GateKind::Cnot,
        GateKind::Swap,
        GateKind::Toffoli,
        GateKind::Measure,
    ];

    /// Canonical upper-case name, as shown in circuit listings.
    pub fn name(self) -> &'static str {
        match self {
            GateKind::PauliX => "X",
            GateKind::PauliY => "Y",
            GateKind::PauliZ => "Z",
            GateKind::Hadamard => "H",
            GateKind::Cnot => "CNOT",
            GateKind::Swap => "SWAP",
            GateKind::Toffoli => "TOFFOLI",
            GateKind::Measure => "MEASURE",
        }
    }

    /// Number of qubit slots besides the target (controls, or SWAP's first qubit).
    pub fn control_slots(self) -> usize {
        match self {
            GateKind::Cnot | GateKind::Swap => 1,
            GateKind::Toffoli => 2,
            _ => 0,
        }
    }
}

impl FromStr for GateKind {
    type Err = QregError;

    /// Case-insensitive; accepts short (`H`, `X`) and long (`Hadamard`,
    /// `Pauli-X`) spellings. Hyphens, underscores and spaces are ignored.
    fn from_str(name: &str) -> Result<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_uppercase)
            .collect();

        let kind = match normalized.as_str() {
            "X" | "PAULIX" | "NOT" => GateKind::PauliX,
            "Y" | "PAULIY" => GateKind::PauliY,
            "Z" | "PAULIZ" => GateKind::PauliZ,
            "H" | "HADAMARD" => GateKind::Hadamard,
            "CNOT" | "CX" => GateKind::Cnot,
            "SWAP" => GateKind::Swap,
            "TOFFOLI" | "CCNOT" | "CCX" => GateKind::Toffoli,
            "MEASURE" | "M" => GateKind::Measure,
            _ => return Err(QregError::UnknownGate { name: name.to_string() }),
        };
        Ok(kind)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a circuit: a gate kind plus its qubit arguments.
///
/// Qubit indices are 0-based. Which slots exist depends on the variant, so a
/// descriptor can never carry a control qubit it does not use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Pauli-X on `target`.
    PauliX {
        /// Qubit to flip.
        target: usize,
    },
    /// Pauli-Y on `target`.
    PauliY {
        /// Qubit to transform.
        target: usize,
    },
    /// Pauli-Z on `target`.
    PauliZ {
        /// Qubit whose `|1⟩` component is negated.
        target: usize,
    },
    /// Hadamard on `target`.
    Hadamard {
        /// Qubit to transform.
        target: usize,
    },
    /// Flips `target` on the basis states where `control` is `1`.
    Cnot {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
    /// Exchanges the values of `qubit1` and `qubit2`.
    Swap {
        /// First qubit.
        qubit1: usize,
        /// Second qubit.
        qubit2: usize,
    },
    /// Flips `target` on the basis states where both controls are `1`.
    Toffoli {
        /// First control qubit.
        control1: usize,
        /// Second control qubit.
        control2: usize,
        /// Target qubit.
        target: usize,
    },
    /// Measurement request on `target`.
    Measure {
        /// Qubit to measure.
        target: usize,
    },
}

impl Gate {
    /// Builds a descriptor from a kind and loosely supplied slots.
    ///
    /// For CNOT `control1` is the control; for SWAP `control1` is the first
    /// qubit and `target` the second; for Toffoli both controls are required.
    /// Fails if a required slot is missing, a superfluous one is supplied, or
    /// two slots name the same qubit.
    pub fn from_parts(
        kind: GateKind,
        target: usize,
        control1: Option<usize>,
        control2: Option<usize>,
    ) -> Result<Self> {
        let gate_name = kind.name();
        let allowed = kind.control_slots();
        let supplied = [control1, control2];

        // Controls must be filled in order: control2 without control1 is malformed.
        if control1.is_none() && control2.is_some() {
            return Err(QregError::MissingControl { gate: gate_name, required: allowed.max(1) });
        }
        if supplied.iter().flatten().count() > allowed {
            return Err(QregError::UnexpectedControl { gate: gate_name, allowed });
        }
        let missing = || QregError::MissingControl { gate: gate_name, required: allowed };

        let gate = match kind {
            GateKind::PauliX => Gate::PauliX { target },
            GateKind::PauliY => Gate::PauliY { target },
            GateKind::PauliZ => Gate::PauliZ { target },
            GateKind::Hadamard => Gate::Hadamard { target },
            GateKind::Measure => Gate::Measure { target },
            GateKind::Cnot => Gate::Cnot { control: control1.ok_or_else(missing)?, target },
            GateKind::Swap => Gate::Swap { qubit1: control1.ok_or_else(missing)?, qubit2: target },
            GateKind::Toffoli => Gate::Toffoli {
                control1: control1.ok_or_else(missing)?,
                control2: control2.ok_or_else(missing)?,
                target,
            },
        };
        gate.check_distinct()?;
        Ok(gate)
    }

    /// The kind of this gate.
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::PauliX { .. } => GateKind::PauliX,
            Gate::PauliY { .. } => GateKind::PauliY,
            Gate::PauliZ { .. } => GateKind::PauliZ,
            Gate::Hadamard { .. } => GateKind::Hadamard,
            Gate::Cnot { .. } => GateKind::Cnot,
            Gate::Swap { .. } => GateKind::Swap,
            Gate::Toffoli { .. } => GateKind::Toffoli,
            Gate::Measure { .. } => GateKind::Measure,
        }
    }

    /// Canonical name of this gate's kind.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Every qubit the gate touches, controls first and target last.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::PauliX { target }
            | Gate::PauliY { target }
            | Gate::PauliZ { target }
            | Gate::Hadamard { target }
            | Gate::Measure { target } => vec![target],
            Gate::Cnot { control, target } => vec![control, target],
            Gate::Swap { qubit1, qubit2 } => vec![qubit1, qubit2],
            Gate::Toffoli { control1, control2, target } => vec![control1, control2, target],
        }
    }

    /// The target slot (SWAP's second qubit).
    pub fn target(&self) -> usize {
        match *self {
            Gate::PauliX { target }
            | Gate::PauliY { target }
            | Gate::PauliZ { target }
            | Gate::Hadamard { target }
            | Gate::Measure { target }
            | Gate::Cnot { target, .. }
            | Gate::Toffoli { target, .. } => target,
            Gate::Swap { qubit2, .. } => qubit2,
        }
    }

    /// Fails with [`QregError::CoincidentQubits`] if two slots name the same qubit.
    pub fn check_distinct(&self) -> Result<()> {
        let qubits = self.qubits();
        for (i, a) in qubits.iter().enumerate() {
            if qubits[i + 1..].contains(a) {
                return Err(QregError::CoincidentQubits { gate: self.name(), qubit: *a });
            }
        }
        Ok(())
    }

    /// Fails with [`QregError::QubitOutOfRange`] naming the first slot `>= num_qubits`.
    pub fn check_range(&self, num_qubits: usize) -> Result<()> {
        match self.qubits().into_iter().find(|&q| q >= num_qubits) {
            Some(index) => Err(QregError::QubitOutOfRange { index, qubits: num_qubits }),
            None => Ok(()),
        }
    }

    /// Compact label, e.g. `H(q0)` or `CNOT(ctrl=0, target=1)`.
    pub fn label(&self) -> String {
        match *self {
            Gate::Cnot { control, target } => {
                format!("{}(ctrl={}, target={})", self.name(), control, target)
            }
            Gate::Swap { qubit1, qubit2 } => {
                format!("{}(q{}, q{})", self.name(), qubit1, qubit2)
            }
            Gate::Toffoli { control1, control2, target } => format!(
                "{}(ctrl1={}, ctrl2={}, target={})",
                self.name(),
                control1,
                control2,
                target
            ),
            _ => format!("{}(q{})", self.name(), self.target()),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Gate::Cnot { control, target } => {
                write!(f, "{} (Control: {}, Target: {})", self.name(), control, target)
            }
            Gate::Swap { qubit1, qubit2 } => {
                write!(f, "{} (Qubit1: {}, Qubit2: {})", self.name(), qubit1, qubit2)
            }
            Gate::Toffoli { control1, control2, target } => write!(
                f,
                "{} (Control1: {}, Control2: {}, Target: {})",
                self.name(),
                control1,
                control2,
                target
            ),
            _ => write!(f, "{} (Qubit {})", self.name(), self.target()),
        }
    }
}
