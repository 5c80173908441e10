//! Error handling logic

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QregError>;

/// Broad category of a [`QregError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A qubit, basis or circuit index outside its valid bounds.
    Range,
    /// Malformed textual input (basis strings, negative indices).
    Format,
    /// Semantically invalid gate parameters or state.
    InvalidArgument,
    /// A gate kind that is recognised but cannot be executed.
    Unsupported,
}

/// Errors raised by state construction, gate application and circuit editing.
///
/// Every error is raised at the point of detection and propagated unchanged;
/// nothing in the crate retries or swallows them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QregError {
    /// Requested register size is outside the supported range.
    #[error("Qubit count {count} out of range: must be between {min} and {max}")]
    QubitCountOutOfRange {
        /// Requested count.
        count: usize,
        /// Smallest accepted count.
        min: usize,
        /// Largest accepted count.
        max: usize,
    },

    /// A qubit index does not address a qubit of the register.
    #[error("Qubit index {index} out of range for a {qubits}-qubit register")]
    QubitOutOfRange {
        /// Offending qubit index.
        index: usize,
        /// Register size.
        qubits: usize,
    },

    /// A basis-state index is outside `[0, 2^n)`.
    #[error("Basis index {index} out of range for dimension {dimension}")]
    BasisIndexOutOfRange {
        /// Offending basis index.
        index: usize,
        /// State-vector dimension.
        dimension: usize,
    },

    /// A circuit position is outside `[0, len)`.
    #[error("Gate index {index} out of range for a circuit of {len} gate(s)")]
    GateIndexOutOfRange {
        /// Offending position.
        index: usize,
        /// Circuit length.
        len: usize,
    },

    /// A basis-state string has the wrong length or non-binary characters.
    #[error("Invalid basis state '{input}': {reason}")]
    InvalidBasisString {
        /// The rejected input.
        input: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A qubit index supplied through the loose entry point is negative.
    #[error("Qubit index must be non-negative, got {index}")]
    NegativeQubitIndex {
        /// Offending value.
        index: i64,
    },

    /// Two qubit slots of a multi-qubit gate name the same qubit.
    #[error("{gate} requires distinct qubits, but qubit {qubit} is used twice")]
    CoincidentQubits {
        /// Gate name.
        gate: &'static str,
        /// Repeated qubit.
        qubit: usize,
    },

    /// A gate name that maps to no known gate kind.
    #[error("Unknown gate '{name}'")]
    UnknownGate {
        /// The rejected name.
        name: String,
    },

    /// A multi-qubit gate is missing one of its control qubits.
    #[error("{gate} requires {required} control qubit(s)")]
    MissingControl {
        /// Gate name.
        gate: &'static str,
        /// Number of control slots the gate needs.
        required: usize,
    },

    /// A control qubit was supplied to a gate with fewer control slots.
    #[error("{gate} takes {allowed} control qubit(s), but more were supplied")]
    UnexpectedControl {
        /// Gate name.
        gate: &'static str,
        /// Number of control slots the gate accepts.
        allowed: usize,
    },

    /// The squared norm of a state deviates from 1.
    #[error("State vector is not normalized: sum of |a|^2 = {norm_sqr} (tolerance {tolerance})")]
    NotNormalized {
        /// Observed squared norm, formatted.
        norm_sqr: String,
        /// Tolerance that was exceeded, formatted.
        tolerance: String,
    },

    /// Normalization was requested for a state with (near) zero norm.
    #[error("Cannot normalize a state vector with zero norm")]
    ZeroNorm,

    /// A display threshold that is negative or not a finite number.
    #[error("Display threshold must be finite and non-negative, got {value}")]
    InvalidThreshold {
        /// The rejected value, formatted.
        value: String,
    },

    /// The gate kind is known but has no execution semantics.
    #[error("{gate} is not supported: no collapse policy is defined")]
    Unsupported {
        /// Gate name.
        gate: &'static str,
    },
}

impl QregError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QregError::QubitCountOutOfRange { .. }
            | QregError::QubitOutOfRange { .. }
            | QregError::BasisIndexOutOfRange { .. }
            | QregError::GateIndexOutOfRange { .. } => ErrorKind::Range,
            QregError::InvalidBasisString { .. } | QregError::NegativeQubitIndex { .. } => {
                ErrorKind::Format
            }
            QregError::CoincidentQubits { .. }
            | QregError::UnknownGate { .. }
            | QregError::MissingControl { .. }
            | QregError::UnexpectedControl { .. }
            | QregError::NotNormalized { .. }
            | QregError::InvalidThreshold { .. }
            | QregError::ZeroNorm => ErrorKind::InvalidArgument,
            QregError::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }
}
