//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by circuit generation, decoding and experiment runs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Lattice model violates one of its invariants.
    #[error("Invalid lattice configuration: {0}")]
    InvalidConfiguration(String),

    /// Initial state length does not match `2^num_qubits`.
    #[error("Initial state has {got} amplitudes, lattice requires {expected}")]
    DimensionMismatch {
        /// Required amplitude count.
        expected: usize,
        /// Supplied amplitude count.
        got: usize,
    },

    /// A measured outcome has the wrong width or a non-binary character.
    #[error("Malformed bitstring {bitstring:?}: expected {expected_len} characters of '0'/'1'")]
    MalformedBitstring {
        /// The offending outcome string.
        bitstring: String,
        /// Width implied by the lattice (`2 * num_sites`).
        expected_len: usize,
    },

    /// The histogram contains no shots.
    #[error("Sample is empty: counts sum to zero")]
    EmptySample,

    /// The histogram total does not fit in a `u64`.
    #[error("Sample too large: counts sum beyond {}", u64::MAX)]
    CountOverflow,

    /// Shot count must be ≥ 1.
    #[error("shots must be at least 1, got {0}")]
    InvalidShots(u32),

    /// Backend refused the circuit during validation.
    #[error("Backend rejected circuit: {}", .0.join("; "))]
    BackendRejected(Vec<String>),

    /// Configuration file could not be parsed.
    #[error("Configuration parse error: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] hubbard_ir::IrError),

    /// Execution boundary returned an error.
    #[error("Backend error: {0}")]
    Hal(#[from] hubbard_hal::HalError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
