//! `hubbard-sim`: Trotterized Fermi-Hubbard chain circuits.
//!
//! A chain of `L` sites with hopping `J` and on-site interaction `U` is
//! mapped onto `2L` qubits (spin-up register first, spin-down second).
//! [`TrotterCircuitBuilder`] turns a [`LatticeModel`] and starting state into
//! a measured `hubbard_ir::Circuit`; [`DensityDecoder`] turns the measured
//! histogram back into per-site occupation probabilities.
//!
//! # Quick start
//!
//! ```rust
//! use hubbard_hal::Counts;
//! use hubbard_sim::{DensityDecoder, LatticeModel, TrotterCircuitBuilder};
//!
//! let model = LatticeModel::new(2, 1.0, 0.5, 0.1, 3).unwrap();
//! let circuit = TrotterCircuitBuilder::new(model).build_default().unwrap();
//! assert_eq!(circuit.num_qubits(), 4);
//! assert_eq!(circuit.gate_count(), 3 * 28);
//!
//! let counts = Counts::from_pairs([("1001", 50), ("0110", 50)]);
//! let dist = DensityDecoder::decode(&counts, 2).unwrap();
//! assert_eq!(dist.site(0).unwrap().up, 0.5);
//! ```

pub mod config;
pub mod density;
pub mod error;
pub mod experiment;
pub mod hamiltonian;
pub mod lattice;
pub mod trotter;

pub use config::{InitialStateConfig, LatticeConfig};
pub use density::{DensityDecoder, OccupationClass, OccupationDistribution, SiteOccupation, Spin};
pub use error::{SimError, SimResult};
pub use experiment::{CircuitSummary, Experiment, ExperimentOutcome};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
pub use lattice::LatticeModel;
pub use trotter::TrotterCircuitBuilder;
