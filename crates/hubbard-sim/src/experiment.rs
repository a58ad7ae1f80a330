//! End-to-end runs: build, execute, decode.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use hubbard_hal::{Backend, Counts, JobId, ValidationResult};
use hubbard_ir::{Circuit, StateVector};

use crate::density::{DensityDecoder, OccupationDistribution};
use crate::error::{SimError, SimResult};
use crate::lattice::LatticeModel;
use crate::trotter::TrotterCircuitBuilder;

/// Shape of a generated circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSummary {
    pub name: String,
    pub num_qubits: usize,
    pub num_clbits: usize,
    pub gate_count: usize,
    pub depth: usize,
    /// Instruction counts by name.
    pub ops: Vec<(String, usize)>,
}

impl From<&Circuit> for CircuitSummary {
    fn from(circuit: &Circuit) -> Self {
        Self {
            name: circuit.name().to_string(),
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
            gate_count: circuit.gate_count(),
            depth: circuit.depth(),
            ops: circuit.count_ops(),
        }
    }
}

/// Everything produced by one [`Experiment::run`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentOutcome {
    pub backend: String,
    pub job_id: JobId,
    pub shots: u32,
    pub circuit: CircuitSummary,
    pub counts: Counts,
    pub distribution: OccupationDistribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

/// Runs Hubbard Trotter circuits on an injected backend.
pub struct Experiment<'a> {
    backend: &'a dyn Backend,
}

impl<'a> Experiment<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// Build the circuit for `model`, execute it for `shots` shots and decode
    /// the histogram.
    ///
    /// Failed jobs are reported, never retried.
    #[instrument(skip_all, fields(backend = self.backend.name(), num_sites = model.num_sites, shots = shots))]
    pub async fn run(
        &self,
        model: &LatticeModel,
        initial_state: StateVector,
        shots: u32,
    ) -> SimResult<ExperimentOutcome> {
        if shots == 0 {
            return Err(SimError::InvalidShots(shots));
        }

        let circuit = TrotterCircuitBuilder::new(model.clone()).build(initial_state)?;
        let summary = CircuitSummary::from(&circuit);

        if let ValidationResult::Invalid { reasons } = self.backend.validate(&circuit).await? {
            return Err(SimError::BackendRejected(reasons));
        }

        let job_id = self.backend.submit(&circuit, shots).await?;
        info!(job_id = %job_id, gate_count = summary.gate_count, "submitted");
        let result = self.backend.wait(&job_id).await?;

        let distribution = DensityDecoder::decode(&result.counts, model.num_sites)?;
        info!(
            outcomes = result.counts.len(),
            total = result.counts.total_shots(),
            "decoded"
        );

        Ok(ExperimentOutcome {
            backend: self.backend.name().to_string(),
            job_id,
            shots,
            circuit: summary,
            counts: result.counts,
            distribution,
            execution_time_ms: result.execution_time_ms,
        })
    }
}
