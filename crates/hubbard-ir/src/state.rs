//! Initial state vectors.
//!
//! A [`StateVector`] holds `2^n` complex amplitudes indexed by basis state,
//! with qubit `k` mapped to bit `k` of the index (little-endian). It is
//! normalised to unit L2 norm on construction and immutable afterwards.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Largest register a dense state vector may describe.
pub const MAX_STATE_QUBITS: u32 = 30;

/// A normalised dense quantum state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Complex64>", into = "Vec<Complex64>")]
pub struct StateVector {
    amplitudes: Vec<Complex64>,
    num_qubits: u32,
}

impl StateVector {
    /// Create a state from raw amplitudes, normalising them.
    ///
    /// The length must be a power of two and the norm finite and non-zero.
    pub fn new(amplitudes: Vec<Complex64>) -> IrResult<Self> {
        let len = amplitudes.len();
        if len == 0 || !len.is_power_of_two() {
            return Err(IrError::InvalidStateVector(format!(
                "length {len} is not a power of two"
            )));
        }
        let num_qubits = len.trailing_zeros();
        if num_qubits > MAX_STATE_QUBITS {
            return Err(IrError::InvalidStateVector(format!(
                "{num_qubits} qubits exceeds the dense limit of {MAX_STATE_QUBITS}"
            )));
        }

        let norm = amplitudes.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
        if !norm.is_finite() || norm == 0.0 {
            return Err(IrError::InvalidStateVector(format!(
                "norm {norm} cannot be normalised"
            )));
        }

        let amplitudes = amplitudes.into_iter().map(|a| a / norm).collect();
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Create a state from real amplitudes.
    pub fn from_real(values: &[f64]) -> IrResult<Self> {
        Self::new(values.iter().map(|&v| Complex64::new(v, 0.0)).collect())
    }

    /// The computational basis state `|index⟩` on `num_qubits` qubits.
    pub fn basis(num_qubits: u32, index: usize) -> IrResult<Self> {
        let dim = dimension(num_qubits)?;
        if index >= dim {
            return Err(IrError::InvalidStateVector(format!(
                "basis index {index} out of range for {num_qubits} qubits"
            )));
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Number of amplitudes (`2^num_qubits`).
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false: a valid state has at least one amplitude.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Number of qubits this state spans.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// L2 norm (1 up to rounding).
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .sum::<f64>()
            .sqrt()
    }

    /// Born-rule probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }
}

impl TryFrom<Vec<Complex64>> for StateVector {
    type Error = IrError;

    fn try_from(amplitudes: Vec<Complex64>) -> IrResult<Self> {
        Self::new(amplitudes)
    }
}

impl From<StateVector> for Vec<Complex64> {
    fn from(state: StateVector) -> Self {
        state.amplitudes
    }
}

/// `2^num_qubits`, bounded by [`MAX_STATE_QUBITS`].
pub fn dimension(num_qubits: u32) -> IrResult<usize> {
    if num_qubits > MAX_STATE_QUBITS {
        return Err(IrError::InvalidStateVector(format!(
            "{num_qubits} qubits exceeds the dense limit of {MAX_STATE_QUBITS}"
        )));
    }
    Ok(1usize << num_qubits)
}
