//! End-to-end runs of Hubbard Trotter circuits on the local simulator.

use hubbard_adapter_sim::SimulatorBackend;
use hubbard_hal::{Backend, BackendConfig, BackendFactory, HalError};
use hubbard_ir::StateVector;
use hubbard_sim::{
    DensityDecoder, Experiment, LatticeModel, OccupationClass, SimError, TrotterCircuitBuilder,
};

// ---------------------------------------------------------------------------
// Trivial dynamics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_couplings_keep_default_state() {
    let backend = SimulatorBackend::new().with_seed(11);
    let model = LatticeModel::new(2, 0.0, 0.0, 0.1, 3).unwrap();
    let outcome = Experiment::new(&backend)
        .run(&model, model.default_state().unwrap(), 200)
        .await
        .unwrap();

    // |1 << 2⟩: spin-down orbital of site 0.
    assert_eq!(outcome.counts.get("0010"), 200);
    let site0 = outcome.distribution.site(0).unwrap();
    assert_eq!(site0.most_likely(), OccupationClass::Down);
    assert_eq!(site0.down, 1.0);
    assert_eq!(outcome.distribution.site(1).unwrap().empty, 1.0);
}

#[tokio::test]
async fn interaction_only_evolution_is_diagonal() {
    let backend = SimulatorBackend::new().with_seed(5);
    let model = LatticeModel::new(3, 0.0, 2.5, 0.3, 4).unwrap();
    // Doubly occupy site 1: qubits 1 and 4.
    let state = StateVector::basis(6, (1 << 1) | (1 << 4)).unwrap();
    let outcome = Experiment::new(&backend).run(&model, state, 64).await.unwrap();

    assert_eq!(outcome.counts.len(), 1);
    assert_eq!(outcome.counts.get("010010"), 64);
    assert_eq!(outcome.distribution.site(1).unwrap().both, 1.0);
}

// ---------------------------------------------------------------------------
// Non-trivial dynamics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hopping_spreads_occupation_and_stays_normalised() {
    let backend = SimulatorBackend::new().with_seed(2024);
    let model = LatticeModel::new(3, 1.0, 0.5, std::f64::consts::PI / 10.0, 5).unwrap();
    let outcome = Experiment::new(&backend)
        .run(&model, model.default_state().unwrap(), 2000)
        .await
        .unwrap();

    assert_eq!(outcome.counts.total_shots(), 2000);
    assert!(outcome.counts.len() > 1);
    for site in outcome.distribution.sites() {
        assert!((site.total() - 1.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn seeded_backend_reproduces_counts() {
    let model = LatticeModel::new(2, 1.0, 0.5, 0.2, 3).unwrap();
    let circuit = TrotterCircuitBuilder::new(model).build_default().unwrap();

    let run = |seed: u64| {
        let circuit = circuit.clone();
        async move {
            let backend = SimulatorBackend::new().with_seed(seed);
            let job = backend.submit(&circuit, 500).await.unwrap();
            backend.wait(&job).await.unwrap().counts
        }
    };

    assert_eq!(run(9).await, run(9).await);
}

#[tokio::test]
async fn simulator_counts_decode_directly() {
    let backend = SimulatorBackend::new().with_seed(3);
    let model = LatticeModel::new(2, 0.7, 1.3, 0.25, 2).unwrap();
    let circuit = TrotterCircuitBuilder::new(model.clone())
        .build_default()
        .unwrap();
    let job = backend.submit(&circuit, 300).await.unwrap();
    let result = backend.wait(&job).await.unwrap();

    assert!(result.counts.iter().all(|(k, _)| k.len() == 4));
    let dist = DensityDecoder::decode(&result.counts, model.num_sites).unwrap();
    assert_eq!(dist.total_shots(), 300);
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

#[tokio::test]
async fn configured_width_limit_rejects_large_lattice() {
    let config = BackendConfig::new("small").with_extra("max_qubits", serde_json::json!(4));
    let backend = SimulatorBackend::from_config(config).unwrap();
    let model = LatticeModel::new(3, 1.0, 1.0, 0.1, 1).unwrap();

    let err = Experiment::new(&backend)
        .run(&model, model.default_state().unwrap(), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, SimError::BackendRejected(_)));

    let circuit = TrotterCircuitBuilder::new(model).build_default().unwrap();
    assert!(matches!(
        backend.submit(&circuit, 10).await,
        Err(HalError::CircuitTooLarge(_))
    ));
}
