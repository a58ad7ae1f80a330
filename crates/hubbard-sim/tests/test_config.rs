//! Tests for file-based lattice configuration.

use std::io::Write;

use hubbard_sim::{InitialStateConfig, LatticeConfig, SimError};

#[test]
fn yaml_overrides_defaults() {
    let config = LatticeConfig::from_yaml_str(
        "num_sites: 4\nstep_count: 10\ninteraction_u: 2.0\n",
    )
    .unwrap();
    assert_eq!(config.num_sites, 4);
    assert_eq!(config.step_count, 10);
    assert_eq!(config.interaction_u, 2.0);
    assert_eq!(config.hopping_j, 1.0);

    let (model, state) = config.into_model().unwrap();
    assert_eq!(model.num_qubits, 8);
    assert_eq!(state.len(), 256);
    assert!((state.probabilities()[16] - 1.0).abs() < 1e-12);
}

#[test]
fn json_basis_index_state() {
    let config = LatticeConfig::from_json_str(
        r#"{"num_sites": 2, "initial_state": {"basis_index": 3}}"#,
    )
    .unwrap();
    assert_eq!(config.initial_state, Some(InitialStateConfig::BasisIndex(3)));
    let (_, state) = config.into_model().unwrap();
    assert!((state.probabilities()[3] - 1.0).abs() < 1e-12);
}

#[test]
fn amplitudes_are_normalised() {
    let config = LatticeConfig::from_yaml_str(
        "num_sites: 1\ninitial_state:\n  amplitudes: [1.0, 0.0, 0.0, 1.0]\n",
    )
    .unwrap();
    let (_, state) = config.into_model().unwrap();
    assert!((state.norm() - 1.0).abs() < 1e-12);
    assert!((state.probabilities()[0] - 0.5).abs() < 1e-12);
}

#[test]
fn out_of_range_basis_index_fails() {
    let config = LatticeConfig {
        num_sites: 1,
        initial_state: Some(InitialStateConfig::BasisIndex(4)),
        ..LatticeConfig::default()
    };
    assert!(matches!(config.into_model(), Err(SimError::Ir(_))));
}

#[test]
fn invalid_values_fail_validation() {
    let config = LatticeConfig::from_yaml_str("step_count: 0").unwrap();
    assert!(matches!(
        config.to_model(),
        Err(SimError::InvalidConfiguration(_))
    ));
}

#[test]
fn from_path_picks_format_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("lattice.json");
    std::fs::File::create(&json_path)
        .unwrap()
        .write_all(br#"{"num_sites": 5}"#)
        .unwrap();
    assert_eq!(LatticeConfig::from_path(&json_path).unwrap().num_sites, 5);

    let yaml_path = dir.path().join("lattice.yaml");
    std::fs::write(&yaml_path, "num_sites: 6\n").unwrap();
    assert_eq!(LatticeConfig::from_path(&yaml_path).unwrap().num_sites, 6);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        LatticeConfig::from_path(dir.path().join("absent.yaml")),
        Err(SimError::Io(_))
    ));
}
