// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

// Re-export public types for convenient access via `qreg::core::TypeName`
pub use error::{ErrorKind, QregError, Result};
pub use state::{BasisAmplitude, StateVector};

pub mod constants;
pub use constants::qreg_constants::{
    DISPLAY_THRESHOLD, FRAC_1_SQRT_2, MAX_QUBITS, MIN_QUBITS, NORM_TOLERANCE,
};
