//! Hubbard Local Statevector Simulator
//!
//! A [`hubbard_hal::Backend`] that executes rotation circuits exactly on a
//! dense statevector and samples the final distribution. Memory grows as
//! `16 · 2^n` bytes, so the default register limit is 20 qubits.
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 16 | ~1 MB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB |
//!
//! # Example
//!
//! ```ignore
//! use hubbard_adapter_sim::SimulatorBackend;
//! use hubbard_hal::Backend;
//! use hubbard_sim::{LatticeModel, TrotterCircuitBuilder};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new().with_seed(7);
//!
//!     let model = LatticeModel::new(3, 1.0, 0.5, 0.1, 4)?;
//!     let circuit = TrotterCircuitBuilder::new(model).build_default()?;
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     println!("Results: {:?}", result.counts.sorted());
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
