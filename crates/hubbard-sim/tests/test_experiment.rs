//! Tests for experiment orchestration against scripted backends.

use std::sync::Mutex;

use async_trait::async_trait;
use hubbard_hal::{
    Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult, JobId, JobStatus,
};
use hubbard_ir::Circuit;
use hubbard_sim::{Experiment, LatticeModel, SimError};

/// Returns a fixed histogram, or fails every job when `fail` is set.
struct ScriptedBackend {
    caps: Capabilities,
    counts: Counts,
    fail: bool,
    submitted: Mutex<Vec<(usize, u32)>>,
}

impl ScriptedBackend {
    fn new(num_qubits: u32, counts: Counts) -> Self {
        Self {
            caps: Capabilities::simulator(num_qubits),
            counts,
            fail: false,
            submitted: Mutex::new(vec![]),
        }
    }

    fn failing(num_qubits: u32) -> Self {
        Self {
            fail: true,
            ..Self::new(num_qubits, Counts::new())
        }
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.submitted
            .lock()
            .unwrap()
            .push((circuit.num_qubits(), shots));
        Ok(JobId::new("scripted-1"))
    }

    async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
        if self.fail {
            Ok(JobStatus::Failed("device offline".into()))
        } else {
            Ok(JobStatus::Completed)
        }
    }

    async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
        let shots = self.counts.total_shots() as u32;
        Ok(ExecutionResult::new(self.counts.clone(), shots).with_execution_time(2))
    }

    async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
        Ok(())
    }
}

fn two_site_model() -> LatticeModel {
    LatticeModel::new(2, 1.0, 0.5, 0.1, 2).unwrap()
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_builds_submits_and_decodes() {
    let backend = ScriptedBackend::new(4, Counts::from_pairs([("1001", 50), ("0110", 50)]));
    let model = two_site_model();
    let outcome = Experiment::new(&backend)
        .run(&model, model.default_state().unwrap(), 100)
        .await
        .unwrap();

    assert_eq!(outcome.backend, "scripted");
    assert_eq!(outcome.job_id, JobId::new("scripted-1"));
    assert_eq!(outcome.shots, 100);
    assert_eq!(outcome.circuit.num_qubits, 4);
    assert_eq!(outcome.circuit.gate_count, 2 * 28);
    assert_eq!(outcome.execution_time_ms, Some(2));
    assert_eq!(outcome.counts.total_shots(), 100);
    assert_eq!(outcome.distribution.site(0).unwrap().up, 0.5);
    assert_eq!(*backend.submitted.lock().unwrap(), vec![(4, 100)]);
}

#[tokio::test]
async fn outcome_serializes_to_json() {
    let backend = ScriptedBackend::new(4, Counts::from_pairs([("0000", 8)]));
    let model = two_site_model();
    let outcome = Experiment::new(&backend)
        .run(&model, model.default_state().unwrap(), 8)
        .await
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["counts"]["0000"], 8);
    assert_eq!(json["circuit"]["name"], "hubbard_trotter");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_shots_rejected_before_submission() {
    let backend = ScriptedBackend::new(4, Counts::new());
    let model = two_site_model();
    let err = Experiment::new(&backend)
        .run(&model, model.default_state().unwrap(), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, SimError::InvalidShots(0)));
    assert!(backend.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn narrow_backend_rejects_circuit() {
    let backend = ScriptedBackend::new(2, Counts::new());
    let model = two_site_model();
    let err = Experiment::new(&backend)
        .run(&model, model.default_state().unwrap(), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, SimError::BackendRejected(reasons) if !reasons.is_empty()));
    assert!(backend.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_job_is_reported_once() {
    let backend = ScriptedBackend::failing(4);
    let model = two_site_model();
    let err = Experiment::new(&backend)
        .run(&model, model.default_state().unwrap(), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, SimError::Hal(HalError::JobFailed(_))));
    assert_eq!(backend.submitted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_backend_counts_surface_as_decode_error() {
    let backend = ScriptedBackend::new(4, Counts::from_pairs([("01", 3)]));
    let model = two_site_model();
    let err = Experiment::new(&backend)
        .run(&model, model.default_state().unwrap(), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, SimError::MalformedBitstring { .. }));
}
