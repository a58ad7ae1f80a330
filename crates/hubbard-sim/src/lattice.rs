//! One-dimensional Fermi-Hubbard chain parameters.
//!
//! A chain of `L` sites is mapped onto `2L` qubits. Qubits `0..L` hold the
//! spin-up orbitals and qubits `L..2L` the spin-down orbitals, so site `j`
//! owns qubits `j` and `L + j`.
//!
//! ```text
//!   site:       0    1    2   ...  L-1
//!   spin up:   q0   q1   q2   ...  q(L-1)
//!   spin down: qL  q(L+1) ...      q(2L-1)
//! ```

use serde::{Deserialize, Serialize};

use hubbard_ir::state::dimension;
use hubbard_ir::{MAX_STATE_QUBITS, QubitId, StateVector};

use crate::error::{SimError, SimResult};

/// Parameters of a Trotterized Fermi-Hubbard chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeModel {
    /// Number of lattice sites `L`.
    pub num_sites: u32,
    /// Register width, always `2 * num_sites`.
    pub num_qubits: u32,
    /// Hopping amplitude `J`.
    pub hopping_j: f64,
    /// On-site interaction `U`.
    pub interaction_u: f64,
    /// Time increment per Trotter step.
    pub angle_increment: f64,
    /// Number of Trotter steps.
    pub step_count: u32,
}

impl LatticeModel {
    /// Create a validated model for a chain of `num_sites` sites.
    pub fn new(
        num_sites: u32,
        hopping_j: f64,
        interaction_u: f64,
        angle_increment: f64,
        step_count: u32,
    ) -> SimResult<Self> {
        let num_qubits = num_sites.checked_mul(2).ok_or_else(|| {
            SimError::InvalidConfiguration(format!("{num_sites} sites overflows the register width"))
        })?;
        let model = Self {
            num_sites,
            num_qubits,
            hopping_j,
            interaction_u,
            angle_increment,
            step_count,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check every invariant of the model.
    ///
    /// The fields are public, so builders call this again before use.
    pub fn validate(&self) -> SimResult<()> {
        if self.num_sites == 0 {
            return Err(SimError::InvalidConfiguration(
                "num_sites must be at least 1".into(),
            ));
        }
        if self.num_qubits % 2 != 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "num_qubits must be even, got {}",
                self.num_qubits
            )));
        }
        if u64::from(self.num_qubits) != 2 * u64::from(self.num_sites) {
            return Err(SimError::InvalidConfiguration(format!(
                "num_qubits ({}) must equal 2 * num_sites ({})",
                self.num_qubits, self.num_sites
            )));
        }
        if self.num_qubits > MAX_STATE_QUBITS {
            return Err(SimError::InvalidConfiguration(format!(
                "{} qubits exceeds the dense state limit of {MAX_STATE_QUBITS}",
                self.num_qubits
            )));
        }
        if self.step_count == 0 {
            return Err(SimError::InvalidConfiguration(
                "step_count must be at least 1".into(),
            ));
        }
        if !(self.angle_increment.is_finite() && self.angle_increment > 0.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "angle_increment must be a positive finite number, got {}",
                self.angle_increment
            )));
        }
        if !self.hopping_j.is_finite() || !self.interaction_u.is_finite() {
            return Err(SimError::InvalidConfiguration(format!(
                "couplings must be finite, got J = {}, U = {}",
                self.hopping_j, self.interaction_u
            )));
        }
        Ok(())
    }

    /// Number of amplitudes an initial state must have.
    pub fn state_dimension(&self) -> SimResult<usize> {
        Ok(dimension(self.num_qubits)?)
    }

    /// The basis state `|1 << (num_qubits / 2)⟩`.
    ///
    /// This places one particle in the spin-down orbital of site 0.
    pub fn default_state(&self) -> SimResult<StateVector> {
        self.validate()?;
        let index = 1usize << (self.num_qubits / 2);
        Ok(StateVector::basis(self.num_qubits, index)?)
    }

    /// Qubit holding the spin-up orbital of `site`.
    pub fn up_qubit(&self, site: u32) -> QubitId {
        QubitId(site)
    }

    /// Qubit holding the spin-down orbital of `site`.
    pub fn down_qubit(&self, site: u32) -> QubitId {
        QubitId(self.num_sites + site)
    }

    /// Rotation angles `(alpha, beta) = (-dt * J, -dt * U)` used by every
    /// local block.
    pub fn rotation_angles(&self) -> (f64, f64) {
        let theta = -self.angle_increment;
        (theta * self.hopping_j, theta * self.interaction_u)
    }

    /// Total simulated time, `step_count * angle_increment`.
    pub fn evolution_time(&self) -> f64 {
        f64::from(self.step_count) * self.angle_increment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_width() {
        let model = LatticeModel::new(3, 1.0, 2.0, 0.1, 4).unwrap();
        assert_eq!(model.num_qubits, 6);
        assert_eq!(model.state_dimension().unwrap(), 64);
        assert_eq!(model.down_qubit(1), QubitId(4));
        assert!((model.evolution_time() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_odd_width() {
        let mut model = LatticeModel::new(2, 1.0, 1.0, 0.1, 1).unwrap();
        model.num_qubits = 5;
        assert!(matches!(
            model.validate(),
            Err(SimError::InvalidConfiguration(msg)) if msg.contains("even")
        ));
    }

    #[test]
    fn test_rejects_mismatched_width() {
        let mut model = LatticeModel::new(2, 1.0, 1.0, 0.1, 1).unwrap();
        model.num_qubits = 6;
        assert!(matches!(
            model.validate(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(LatticeModel::new(0, 1.0, 1.0, 0.1, 1).is_err());
        assert!(LatticeModel::new(2, 1.0, 1.0, 0.1, 0).is_err());
        assert!(LatticeModel::new(2, 1.0, 1.0, 0.0, 1).is_err());
        assert!(LatticeModel::new(2, 1.0, 1.0, -0.1, 1).is_err());
        assert!(LatticeModel::new(2, f64::NAN, 1.0, 0.1, 1).is_err());
        assert!(LatticeModel::new(16, 1.0, 1.0, 0.1, 1).is_err());
    }

    #[test]
    fn test_default_state_index() {
        let model = LatticeModel::new(2, 1.0, 1.0, 0.1, 1).unwrap();
        let state = model.default_state().unwrap();
        assert_eq!(state.len(), 16);
        let probs = state.probabilities();
        assert!((probs[4] - 1.0).abs() < 1e-12);
        assert!(probs.iter().enumerate().all(|(i, p)| i == 4 || *p == 0.0));
    }

    #[test]
    fn test_rotation_angles() {
        let model = LatticeModel::new(2, 1.0, 4.0, 0.5, 1).unwrap();
        let (alpha, beta) = model.rotation_angles();
        assert_eq!(alpha, -0.5);
        assert_eq!(beta, -2.0);
    }
}
