//! Trotter circuit synthesis for the Fermi-Hubbard chain.
//!
//! Each step applies a fixed seven-gate block of single-qubit rotations,
//!
//! ```text
//!   RX(α) · RY(2α) · RX(α) · RZ(2β) · RX(α) · RY(2α) · RX(α)
//! ```
//!
//! with `α = -dt·J` and `β = -dt·U`, first to every qubit and then once more
//! to the interior qubits of each spin register (`1..L-1` and `L+1..2L-1`).
//! After the last step a barrier spans the register and qubit `i` is
//! measured into classical bit `i`.

use hubbard_ir::{Circuit, QubitId, RotationAxis, StateVector};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::lattice::LatticeModel;

/// Number of rotations in one local block.
pub const BLOCK_LEN: usize = 7;

/// Name given to generated circuits.
pub const CIRCUIT_NAME: &str = "hubbard_trotter";

/// Builds measured Trotter circuits from a [`LatticeModel`].
#[derive(Debug, Clone)]
pub struct TrotterCircuitBuilder {
    model: LatticeModel,
}

impl TrotterCircuitBuilder {
    /// Create a builder for `model`.
    pub fn new(model: LatticeModel) -> Self {
        Self { model }
    }

    /// The lattice this builder synthesises.
    pub fn model(&self) -> &LatticeModel {
        &self.model
    }

    /// Build the full circuit starting from `initial_state`.
    ///
    /// The model is validated and the state dimension checked before any
    /// instruction is emitted.
    pub fn build(&self, initial_state: StateVector) -> SimResult<Circuit> {
        self.model.validate()?;
        let expected = self.model.state_dimension()?;
        if initial_state.len() != expected {
            return Err(SimError::DimensionMismatch {
                expected,
                got: initial_state.len(),
            });
        }

        let num_sites = self.model.num_sites;
        let targets = self.step_targets();
        debug!(
            num_sites,
            num_qubits = self.model.num_qubits,
            step_count = self.model.step_count,
            gates_per_step = targets.len() * BLOCK_LEN,
            "synthesising Hubbard Trotter circuit"
        );

        let mut circuit = Circuit::new(CIRCUIT_NAME);
        circuit.add_qreg("up", num_sites);
        circuit.add_qreg("down", num_sites);
        circuit.add_creg("c", self.model.num_qubits);
        circuit.initialize(initial_state)?;

        let block = local_block(self.model.rotation_angles());
        for _ in 0..self.model.step_count {
            for &qubit in &targets {
                for &(axis, theta) in &block {
                    circuit.rotation(axis, theta, qubit)?;
                }
            }
        }

        circuit.barrier_all()?;
        circuit.measure_all()?;
        Ok(circuit)
    }

    /// Build the circuit from [`LatticeModel::default_state`].
    pub fn build_default(&self) -> SimResult<Circuit> {
        self.build(self.model.default_state()?)
    }

    /// Rotations emitted per Trotter step.
    pub fn gates_per_step(&self) -> usize {
        self.step_targets().len() * BLOCK_LEN
    }

    /// Qubits visited by one step, in emission order.
    ///
    /// Every qubit once, then the interior of the spin-up register, then the
    /// interior of the spin-down register.
    pub fn step_targets(&self) -> Vec<QubitId> {
        let num_qubits = self.model.num_qubits;
        let half = num_qubits / 2;
        (0..num_qubits)
            .chain(1..half.saturating_sub(1))
            .chain(half + 1..num_qubits.saturating_sub(1))
            .map(QubitId)
            .collect()
    }
}

/// The seven `(axis, angle)` rotations of one local block.
fn local_block((alpha, beta): (f64, f64)) -> [(RotationAxis, f64); BLOCK_LEN] {
    [
        (RotationAxis::X, alpha),
        (RotationAxis::Y, 2.0 * alpha),
        (RotationAxis::X, alpha),
        (RotationAxis::Z, 2.0 * beta),
        (RotationAxis::X, alpha),
        (RotationAxis::Y, 2.0 * alpha),
        (RotationAxis::X, alpha),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_targets_two_sites() {
        let model = LatticeModel::new(2, 1.0, 1.0, 0.1, 1).unwrap();
        let builder = TrotterCircuitBuilder::new(model);
        assert_eq!(
            builder.step_targets(),
            vec![QubitId(0), QubitId(1), QubitId(2), QubitId(3)]
        );
        assert_eq!(builder.gates_per_step(), 28);
    }

    #[test]
    fn test_step_targets_four_sites() {
        let model = LatticeModel::new(4, 1.0, 1.0, 0.1, 1).unwrap();
        let builder = TrotterCircuitBuilder::new(model);
        let targets: Vec<u32> = builder.step_targets().into_iter().map(|q| q.0).collect();
        assert_eq!(targets, vec![0, 1, 2, 3, 4, 5, 6, 7, 1, 2, 5, 6]);
    }

    #[test]
    fn test_step_targets_single_site() {
        let model = LatticeModel::new(1, 1.0, 1.0, 0.1, 1).unwrap();
        let builder = TrotterCircuitBuilder::new(model);
        assert_eq!(builder.step_targets(), vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_local_block_angles() {
        let block = local_block((0.5, -1.0));
        let angles: Vec<f64> = block.iter().map(|&(_, t)| t).collect();
        assert_eq!(angles, vec![0.5, 1.0, 0.5, -2.0, 0.5, 1.0, 0.5]);
        assert_eq!(block[3].0, RotationAxis::Z);
    }
}
