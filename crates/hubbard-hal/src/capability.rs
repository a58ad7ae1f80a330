//! Backend capability introspection.
//!
//! Describes what a backend can execute: register width, gate vocabulary and
//! shot limits. Orchestration uses it to reject a circuit before
//! submission instead of after a failed job.

use serde::{Deserialize, Serialize};

/// Hardware capabilities of a quantum backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Gate names the backend executes.
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Additional capability flags, e.g. `"statevector"`, `"initialize"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::rotations(),
            max_shots: 1_000_000,
            features: vec!["statevector".into(), "initialize".into()],
        }
    }

    /// Whether `feature` is advertised.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gate vocabulary of a backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
}

impl GateSet {
    /// Pauli-axis rotations only: `rx`, `ry`, `rz`.
    pub fn rotations() -> Self {
        Self {
            single_qubit: vec!["rx".into(), "ry".into(), "rz".into()],
        }
    }

    /// Whether a gate with this name can be executed.
    pub fn contains(&self, name: &str) -> bool {
        self.single_qubit.iter().any(|g| g == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(12);
        assert_eq!(caps.name, "simulator");
        assert_eq!(caps.num_qubits, 12);
        assert!(caps.has_feature("initialize"));
        assert!(!caps.has_feature("mid_circuit_measurement"));
    }

    #[test]
    fn test_rotation_gate_set() {
        let gates = GateSet::rotations();
        assert!(gates.contains("rx"));
        assert!(gates.contains("rz"));
        assert!(!gates.contains("cx"));
        assert_eq!(gates.single_qubit.len(), 3);
    }
}
