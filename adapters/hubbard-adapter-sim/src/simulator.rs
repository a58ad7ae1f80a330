//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use hubbard_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, Job, JobId, JobStatus,
};
use hubbard_ir::{Circuit, InstructionKind, MAX_STATE_QUBITS};

use crate::statevector::Statevector;

/// Default register limit.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local statevector simulator.
///
/// The unitary part of a circuit is evolved once per job; the final
/// distribution is then sampled `shots` times. With a seed, identical
/// submissions produce identical histograms.
pub struct SimulatorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    max_qubits: u32,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a simulator with default settings and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::build(BackendConfig::new("simulator"), DEFAULT_MAX_QUBITS, None)
    }

    /// Create a simulator with custom max qubits, capped at
    /// [`MAX_STATE_QUBITS`].
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(BackendConfig::new("simulator"), max_qubits, None)
    }

    /// Fix the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: Option<u64>) -> Self {
        if max_qubits > MAX_STATE_QUBITS {
            debug!(requested = max_qubits, limit = MAX_STATE_QUBITS, "capping max_qubits");
        }
        let max_qubits = max_qubits.min(MAX_STATE_QUBITS);
        let mut capabilities = Capabilities::simulator(max_qubits);
        capabilities.name.clone_from(&config.name);
        Self {
            config,
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
            seed,
        }
    }

    fn jobs(&self) -> MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Evolve the circuit and sample `shots` outcomes.
    ///
    /// Character `k` of every outcome is classical bit `k`. A circuit with
    /// no measurement reads out every qubit in index order.
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let mut sv = Statevector::new(circuit.num_qubits());
        let mut readout: Vec<Option<usize>> = vec![None; circuit.num_clbits()];
        let mut measured = false;

        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Measure => {
                    measured = true;
                    readout[inst.clbits[0].index()] = Some(inst.qubits[0].index());
                }
                InstructionKind::Barrier => {}
                _ if measured => {
                    return Err(HalError::Unsupported(format!(
                        "'{}' after measurement",
                        inst.name()
                    )));
                }
                _ => sv.apply(inst)?,
            }
        }
        if !measured {
            readout = (0..sv.num_qubits()).map(Some).collect();
        }
        debug!(
            instructions = circuit.len(),
            width = readout.len(),
            "statevector evolved"
        );

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sampler = sv.sampler();
        let mut tallies: FxHashMap<usize, u64> = FxHashMap::default();
        for _ in 0..shots {
            *tallies.entry(sampler.sample(&mut rng)).or_insert(0) += 1;
        }

        let counts: Counts = tallies
            .into_iter()
            .map(|(outcome, n)| (outcome_to_bitstring(outcome, &readout), n))
            .collect();

        let elapsed = start.elapsed();
        debug!(outcomes = counts.len(), ?elapsed, "simulation completed");

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}

/// Render a basis index through the clbit readout map.
fn outcome_to_bitstring(outcome: usize, readout: &[Option<usize>]) -> String {
    readout
        .iter()
        .map(|q| match q {
            Some(q) if (outcome >> q) & 1 == 1 => '1',
            _ => '0',
        })
        .collect()
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} not in 1..={}",
                self.capabilities.max_shots
            )));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let mut job = Job::new(job_id.clone(), shots, self.name());
        job.transition(JobStatus::Running);
        self.jobs()
            .insert(job_id.0.clone(), SimJob { job, result: None });
        debug!(job_id = %job_id, "submitted");

        // Runs inline; the job is terminal by the time submit returns.
        let outcome = self.run_simulation(circuit, shots);

        let mut jobs = self.jobs();
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            match outcome {
                Ok(result) => {
                    sim_job.result = Some(result);
                    sim_job.job.transition(JobStatus::Completed);
                }
                Err(e) => {
                    sim_job.job.transition(JobStatus::Failed(e.to_string()));
                }
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs();
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        match &sim_job.job.status {
            JobStatus::Completed => sim_job
                .result
                .clone()
                .ok_or_else(|| HalError::Backend(format!("job {job_id} has no result"))),
            JobStatus::Failed(msg) => Err(HalError::JobFailed(msg.clone())),
            JobStatus::Cancelled => Err(HalError::JobCancelled),
            JobStatus::Queued | JobStatus::Running => Err(HalError::Backend(format!(
                "job {job_id} has not finished"
            ))),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs();
        let sim_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        if !sim_job.job.transition(JobStatus::Cancelled) {
            debug!(job_id = %job_id, status = %sim_job.job.status, "cancel ignored");
        }
        Ok(())
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.get_u64("max_qubits")? {
            Some(v) => u32::try_from(v).map_err(|_| {
                HalError::Configuration(format!("max_qubits {v} out of range"))
            })?,
            None => DEFAULT_MAX_QUBITS,
        };
        let seed = config.get_u64("seed")?;
        Ok(Self::build(config, max_qubits, seed))
    }
}
