//! Statevector simulation engine.
//!
//! Qubit `k` is bit `k` of the amplitude index, matching
//! [`hubbard_ir::StateVector`].

use num_complex::Complex64;
use rand::Rng;

use hubbard_hal::{HalError, HalResult};
use hubbard_ir::{Instruction, InstructionKind, StandardGate, StateVector};

/// Dense amplitudes of an `n`-qubit register.
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a register in `|0...0⟩`.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply one instruction. Barriers and measurements leave the state
    /// untouched; readout is handled by the caller.
    pub fn apply(&mut self, instruction: &Instruction) -> HalResult<()> {
        match &instruction.kind {
            InstructionKind::Initialize(state) => {
                if instruction.qubits.len() != self.num_qubits {
                    return Err(HalError::Unsupported(format!(
                        "initialization of {} of {} qubits",
                        instruction.qubits.len(),
                        self.num_qubits
                    )));
                }
                self.load(state)
            }
            InstructionKind::Gate(gate) => {
                let qubit = instruction.qubits[0].index();
                match *gate {
                    StandardGate::Rx(theta) => self.apply_rx(qubit, theta),
                    StandardGate::Ry(theta) => self.apply_ry(qubit, theta),
                    StandardGate::Rz(theta) => self.apply_rz(qubit, theta),
                }
                Ok(())
            }
            InstructionKind::Barrier | InstructionKind::Measure => Ok(()),
        }
    }

    /// Replace the register contents with `state`.
    fn load(&mut self, state: &StateVector) -> HalResult<()> {
        if state.len() != self.amplitudes.len() {
            return Err(HalError::InvalidCircuit(format!(
                "initial state has {} amplitudes, register needs {}",
                state.len(),
                self.amplitudes.len()
            )));
        }
        self.amplitudes.copy_from_slice(state.amplitudes());
        Ok(())
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    /// Probability of each basis state.
    #[cfg(test)]
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Cumulative distribution for repeated sampling.
    pub fn sampler(&self) -> Sampler {
        let mut total = 0.0;
        let cumulative = self
            .amplitudes
            .iter()
            .map(|a| {
                total += a.norm_sqr();
                total
            })
            .collect();
        Sampler { cumulative, total }
    }
}

/// Draws basis indices from a fixed distribution.
pub struct Sampler {
    cumulative: Vec<f64>,
    total: f64,
}

impl Sampler {
    /// Draw one basis index.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let r = rng.r#gen::<f64>() * self.total;
        self.cumulative
            .partition_point(|&c| c <= r)
            .min(self.cumulative.len() - 1)
    }
}
