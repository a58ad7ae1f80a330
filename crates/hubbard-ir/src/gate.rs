//! Quantum gate types.
//!
//! The Hubbard-chain circuits are built exclusively from single-qubit
//! rotations with concrete angles, so the gate vocabulary is the three
//! Pauli-axis rotations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pauli axis a rotation gate turns about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationAxis {
    /// Rotation about X.
    X,
    /// Rotation about Y.
    Y,
    /// Rotation about Z.
    Z,
}

impl fmt::Display for RotationAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationAxis::X => write!(f, "X"),
            RotationAxis::Y => write!(f, "Y"),
            RotationAxis::Z => write!(f, "Z"),
        }
    }
}

/// Standard gates with known semantics.
///
/// `R_a(θ) = exp(-i θ/2 · σ_a)` for `a ∈ {X, Y, Z}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
}

impl StandardGate {
    /// Build a rotation about `axis` by `theta` radians.
    #[inline]
    pub fn rotation(axis: RotationAxis, theta: f64) -> Self {
        match axis {
            RotationAxis::X => StandardGate::Rx(theta),
            RotationAxis::Y => StandardGate::Ry(theta),
            RotationAxis::Z => StandardGate::Rz(theta),
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        1
    }

    /// The rotation axis.
    #[inline]
    pub fn axis(&self) -> RotationAxis {
        match self {
            StandardGate::Rx(_) => RotationAxis::X,
            StandardGate::Ry(_) => RotationAxis::Y,
            StandardGate::Rz(_) => RotationAxis::Z,
        }
    }

    /// The signed rotation angle in radians.
    #[inline]
    pub fn angle(&self) -> f64 {
        match self {
            StandardGate::Rx(t) | StandardGate::Ry(t) | StandardGate::Rz(t) => *t,
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.angle())
    }
}
