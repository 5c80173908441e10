// src/core/state.rs

use super::constants::qreg_constants::{DISPLAY_THRESHOLD, MAX_QUBITS, MIN_QUBITS, NORM_TOLERANCE};
use super::error::{QregError, Result};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// The amplitude vector of an `n`-qubit register.
///
/// Basis states are addressed by an integer in `[0, 2^n)`; bit `k` of that
/// integer (counting from the least significant bit) is the value of qubit `k`.
/// The vector length is always exactly `2^n`.
///
/// Gate logic lives in [`GateEngine`](crate::simulation::GateEngine); this type only
/// holds and exposes the amplitudes.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

/// One entry of [`StateVector::significant_amplitudes`].
#[derive(Debug, Clone, PartialEq)]
pub struct BasisAmplitude {
    /// Basis index in `[0, 2^n)`.
    pub index: usize,
    /// Big-endian bit pattern of `index`, `n` characters long.
    pub label: String,
    /// Complex amplitude at `index`.
    pub amplitude: Complex<f64>,
}

impl StateVector {
    /// Creates a register of `num_qubits` qubits in the ground state `|0…0⟩`.
    pub fn new(num_qubits: usize) -> Result<Self> {
        check_qubit_count(num_qubits)?;
        let mut state = Self {
            num_qubits,
            amplitudes: vec![Complex::zero(); 1 << num_qubits],
        };
        state.reset_to_ground_state();
        Ok(state)
    }

    /// Builds a register from an explicit amplitude vector of length `2^num_qubits`.
    /// The vector is taken as is; no normalization is applied.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        check_qubit_count(num_qubits)?;
        let dimension = 1usize << num_qubits;
        if amplitudes.len() != dimension {
            return Err(QregError::BasisIndexOutOfRange {
                index: amplitudes.len(),
                dimension,
            });
        }
        Ok(Self { num_qubits, amplitudes })
    }

    /// Number of qubits `n`.
    pub fn qubit_count(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes, `2^n`.
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Provides read-only access to the amplitude vector.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Mutable access for the gate engine.
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Replaces the whole amplitude vector. The caller guarantees the length.
    pub(crate) fn replace_amplitudes(&mut self, amplitudes: Vec<Complex<f64>>) {
        debug_assert_eq!(amplitudes.len(), self.amplitudes.len());
        self.amplitudes = amplitudes;
    }

    /// Amplitude at basis index `index`.
    pub fn amplitude(&self, index: usize) -> Result<Complex<f64>> {
        self.check_index(index)?;
        Ok(self.amplitudes[index])
    }

    /// Mutable amplitude at basis index `index`.
    pub fn amplitude_mut(&mut self, index: usize) -> Result<&mut Complex<f64>> {
        self.check_index(index)?;
        Ok(&mut self.amplitudes[index])
    }

    /// Sets amplitude 0 to `1` and every other amplitude to `0`.
    pub fn reset_to_ground_state(&mut self) {
        self.set_basis_index(0);
    }

    /// Re-seeds the register to the basis state spelled by `bits`.
    ///
    /// `bits` must be exactly `n` characters of `0`/`1`, read big-endian: the
    /// first character is qubit `n-1` and the last is qubit `0`.
    pub fn set_basis_state(&mut self, bits: &str) -> Result<()> {
        let index = self.parse_basis_string(bits)?;
        // Cannot fire once the string passed the checks above.
        self.check_index(index)?;
        self.set_basis_index(index);
        tracing::debug!(bits, index, "state re-seeded to basis state");
        Ok(())
    }

    /// Big-endian bit pattern of `index`, `n` characters long.
    ///
    /// `index` must be below [`dimension`](Self::dimension); larger values
    /// would need more than `n` bits.
    pub fn basis_label(&self, index: usize) -> String {
        debug_assert!(
            index < self.dimension(),
            "basis index {} out of range for dimension {}",
            index,
            self.dimension()
        );
        format!("{:0width$b}", index, width = self.num_qubits)
    }

    /// Every amplitude whose magnitude exceeds `threshold`, in ascending index
    /// order. `None` uses [`DISPLAY_THRESHOLD`].
    pub fn significant_amplitudes(&self, threshold: Option<f64>) -> Vec<BasisAmplitude> {
        let threshold = threshold.unwrap_or(DISPLAY_THRESHOLD);
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, amp)| amp.norm() > threshold)
            .map(|(index, amp)| BasisAmplitude {
                index,
                label: self.basis_label(index),
                amplitude: *amp,
            })
            .collect()
    }

    /// Probability `|a_index|^2` of observing basis state `index`.
    pub fn probability(&self, index: usize) -> Result<f64> {
        Ok(self.amplitude(index)?.norm_sqr())
    }

    /// Sum of squared magnitudes over the whole vector.
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Marginal probability that `qubit` reads `1`. The state is not collapsed.
    pub fn probability_of_one(&self, qubit: usize) -> Result<f64> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        Ok(self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum())
    }

    /// Rescales the vector to unit norm.
    pub fn normalize(&mut self) -> Result<()> {
        let norm = self.total_probability().sqrt();
        if norm < NORM_TOLERANCE {
            return Err(QregError::ZeroNorm);
        }
        let inv_norm = 1.0 / norm;
        for amp in self.amplitudes.iter_mut() {
            *amp *= inv_norm;
        }
        Ok(())
    }

    /// Fails with [`QregError::QubitOutOfRange`] unless `qubit < n`.
    pub(crate) fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(QregError::QubitOutOfRange {
                index: qubit,
                qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.amplitudes.len() {
            return Err(QregError::BasisIndexOutOfRange {
                index,
                dimension: self.amplitudes.len(),
            });
        }
        Ok(())
    }

    fn set_basis_index(&mut self, index: usize) {
        self.amplitudes.fill(Complex::zero());
        self.amplitudes[index] = Complex::one();
    }

    fn parse_basis_string(&self, bits: &str) -> Result<usize> {
        let invalid = |reason: String| QregError::InvalidBasisString {
            input: bits.to_string(),
            reason,
        };
        let len = bits.chars().count();
        if len != self.num_qubits {
            return Err(invalid(format!(
                "expected {} binary digit(s), got {}",
                self.num_qubits, len
            )));
        }
        bits.chars().try_fold(0usize, |acc, ch| match ch {
            '0' => Ok(acc << 1),
            '1' => Ok((acc << 1) | 1),
            other => Err(invalid(format!("'{}' is not a binary digit", other))),
        })
    }
}

/// Fails with [`QregError::QubitCountOutOfRange`] unless `count` is supported.
pub(crate) fn check_qubit_count(count: usize) -> Result<()> {
    if !(MIN_QUBITS..=MAX_QUBITS).contains(&count) {
        return Err(QregError::QubitCountOutOfRange {
            count,
            min: MIN_QUBITS,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.significant_amplitudes(None);
        if entries.is_empty() {
            return writeln!(f, "No states above threshold");
        }
        for entry in entries {
            writeln!(
                f,
                "|{}⟩ : ({:.6}, {:.6})",
                entry.label, entry.amplitude.re, entry.amplitude.im
            )?;
        }
        Ok(())
    }
}
