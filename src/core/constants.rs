//! Limits and numeric thresholds shared across the simulator.

/// Register-size limits and numeric tolerances.
pub mod qreg_constants {
    /// Smallest register the simulator accepts.
    pub const MIN_QUBITS: usize = 1;
    /// Largest register the simulator accepts (32 amplitudes).
    pub const MAX_QUBITS: usize = 5;
    /// Amplitudes with magnitude at or below this value are omitted from listings.
    pub const DISPLAY_THRESHOLD: f64 = 1e-10;
    /// Allowed deviation of the squared norm from 1.0.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// `1/√2`, the Hadamard normalization factor.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
}
