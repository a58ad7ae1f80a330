//! File-based lattice configuration.
//!
//! Accepts YAML or JSON. Every key is optional:
//!
//! ```yaml
//! num_sites: 3
//! step_count: 4
//! angle_increment: 0.314159
//! hopping_j: 1.0
//! interaction_u: 0.5
//! initial_state:
//!   basis_index: 8
//! ```

use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use hubbard_ir::StateVector;

use crate::error::{SimError, SimResult};
use crate::lattice::LatticeModel;

/// Lattice and evolution parameters as read from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatticeConfig {
    #[serde(default = "default_num_sites")]
    pub num_sites: u32,

    #[serde(default = "default_step_count")]
    pub step_count: u32,

    #[serde(default = "default_angle_increment")]
    pub angle_increment: f64,

    #[serde(default = "default_hopping_j")]
    pub hopping_j: f64,

    #[serde(default = "default_interaction_u")]
    pub interaction_u: f64,

    /// Starting state; the model's default state when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<InitialStateConfig>,
}

/// How the starting state is specified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialStateConfig {
    /// A computational basis state.
    BasisIndex(usize),
    /// Real amplitudes, normalised on load.
    Amplitudes(Vec<f64>),
}

fn default_num_sites() -> u32 {
    3
}

fn default_step_count() -> u32 {
    1
}

fn default_angle_increment() -> f64 {
    PI / 10.0
}

fn default_hopping_j() -> f64 {
    1.0
}

fn default_interaction_u() -> f64 {
    0.5
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            num_sites: default_num_sites(),
            step_count: default_step_count(),
            angle_increment: default_angle_increment(),
            hopping_j: default_hopping_j(),
            interaction_u: default_interaction_u(),
            initial_state: None,
        }
    }
}

impl LatticeConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        serde_yaml_ng::from_str(s).map_err(|e| SimError::Config(e.to_string()))
    }

    /// Parse a JSON document.
    pub fn from_json_str(s: &str) -> SimResult<Self> {
        serde_json::from_str(s).map_err(|e| SimError::Config(e.to_string()))
    }

    /// Load from a file, choosing JSON for a `.json` extension and YAML
    /// otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Build the validated [`LatticeModel`].
    pub fn to_model(&self) -> SimResult<LatticeModel> {
        LatticeModel::new(
            self.num_sites,
            self.hopping_j,
            self.interaction_u,
            self.angle_increment,
            self.step_count,
        )
    }

    /// Build the model together with its starting state.
    pub fn into_model(self) -> SimResult<(LatticeModel, StateVector)> {
        let model = self.to_model()?;
        let state = match self.initial_state {
            None => model.default_state()?,
            Some(InitialStateConfig::BasisIndex(index)) => {
                StateVector::basis(model.num_qubits, index)?
            }
            Some(InitialStateConfig::Amplitudes(values)) => StateVector::from_real(&values)?,
        };
        Ok((model, state))
    }
}
