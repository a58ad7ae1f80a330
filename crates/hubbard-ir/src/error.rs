//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit} not found in circuit")]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
    },

    /// Amplitude vector cannot describe a normalisable quantum state.
    #[error("Invalid state vector: {0}")]
    InvalidStateVector(String),

    /// State vector width does not match the register it is loaded into.
    #[error("State vector has {got} amplitudes but the circuit register needs {expected}")]
    StateDimensionMismatch {
        /// Amplitude count required by the register (2^n).
        expected: usize,
        /// Amplitude count supplied.
        got: usize,
    },

    /// Rotation angle is NaN or infinite.
    #[error("Rotation angle for '{gate_name}' is not finite: {angle}")]
    NonFiniteAngle {
        /// Name of the gate.
        gate_name: String,
        /// The offending angle.
        angle: f64,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
