//! Hubbard Circuit Intermediate Representation
//!
//! This crate provides the data structures every other crate in the
//! workspace exchanges: qubit and classical-bit addressing, single-qubit
//! rotation gates, instructions, initial state vectors and the ordered
//! [`Circuit`] container.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] plus register-aware
//!   [`Qubit`] and [`Clbit`]
//! - **Gates**: [`StandardGate`] rotations about a [`RotationAxis`]
//! - **State preparation**: [`StateVector`], a normalised dense amplitude vector
//! - **Instructions**: [`Instruction`] combining an [`InstructionKind`] with operands
//! - **Circuit**: [`Circuit`], an execution-ordered instruction list
//!
//! # Example
//!
//! ```rust
//! use hubbard_ir::{Circuit, QubitId, StateVector};
//!
//! let mut circuit = Circuit::with_size("single_spin", 1, 1);
//! circuit.initialize(StateVector::basis(1, 0).unwrap()).unwrap();
//! circuit.rx(-0.1, QubitId(0)).unwrap();
//! circuit.barrier_all().unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.gate_count(), 1);
//! assert_eq!(circuit.len(), 4);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates, `exp(-i θ/2 σ)` |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod state;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{RotationAxis, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
pub use state::{MAX_STATE_QUBITS, StateVector};
