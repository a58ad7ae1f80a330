//! Tests for the Jordan-Wigner Hubbard Hamiltonian.

use hubbard_sim::LatticeModel;
use hubbard_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};

// ---------------------------------------------------------------------------
// PauliString
// ---------------------------------------------------------------------------

#[test]
fn pauli_string_drops_identity_and_sorts() {
    let ps = PauliString::from_ops([(3, PauliOp::X), (1, PauliOp::I), (0, PauliOp::Y)]);
    assert_eq!(ps.ops(), &[(0, PauliOp::Y), (3, PauliOp::X)]);
    assert_eq!(ps.weight(), 2);
    assert_eq!(ps.max_qubit(), Some(3));
}

#[test]
fn pauli_string_identity_is_empty() {
    let ps = PauliString::from_ops([] as [(u32, PauliOp); 0]);
    assert!(ps.is_identity());
    assert_eq!(ps.max_qubit(), None);
}

#[test]
fn two_body_shorthands() {
    let t = HamiltonianTerm::yy(4, 1, 0.5);
    assert_eq!(t.pauli.ops(), &[(1, PauliOp::Y), (4, PauliOp::Y)]);
    let t = HamiltonianTerm::xx(0, 1, 0.5);
    assert!(t.pauli.ops().iter().all(|(_, op)| *op == PauliOp::X));
}

// ---------------------------------------------------------------------------
// Fermi-Hubbard decomposition
// ---------------------------------------------------------------------------

#[test]
fn three_site_term_counts() {
    let model = LatticeModel::new(3, 1.0, 2.0, 0.1, 1).unwrap();
    let h = Hamiltonian::fermi_hubbard(&model).unwrap();
    // 2 bonds x 2 spins x (XX + YY) + 3 sites x (Z + Z + ZZ)
    assert_eq!(h.n_terms(), 8 + 9);
    assert_eq!(h.min_qubits(), 6);
    assert!((h.constant() - 1.5).abs() < 1e-15);
}

#[test]
fn single_site_has_no_hopping() {
    let model = LatticeModel::new(1, 1.0, 4.0, 0.1, 1).unwrap();
    let h = Hamiltonian::fermi_hubbard(&model).unwrap();
    assert_eq!(h.n_terms(), 3);
    assert!(h.terms().iter().all(|t| t.pauli.ops().iter().all(|(_, op)| *op == PauliOp::Z)));
}

#[test]
fn hopping_terms_stay_within_spin_register() {
    let model = LatticeModel::new(3, 1.0, 0.0, 0.1, 1).unwrap();
    let h = Hamiltonian::fermi_hubbard(&model).unwrap();
    for term in h.terms().iter().filter(|t| t.pauli.weight() == 2 && t.coeff != 0.0) {
        let qubits: Vec<u32> = term.pauli.ops().iter().map(|(q, _)| *q).collect();
        if term.pauli.ops()[0].1 != PauliOp::Z {
            assert_eq!(qubits[1] - qubits[0], 1);
            assert_eq!(qubits[0] / 3, qubits[1] / 3);
            assert!((term.coeff - 0.5).abs() < 1e-15);
        }
    }
}

#[test]
fn diagonal_energy_counts_double_occupancy() {
    let model = LatticeModel::new(2, 1.0, 3.0, 0.1, 1).unwrap();
    let h = Hamiltonian::fermi_hubbard(&model).unwrap();
    assert!(h.diagonal_energy("0000").abs() < 1e-12);
    assert!(h.diagonal_energy("1000").abs() < 1e-12);
    assert!((h.diagonal_energy("1010") - 3.0).abs() < 1e-12);
    assert!((h.diagonal_energy("1111") - 6.0).abs() < 1e-12);
}

#[test]
fn invalid_model_rejected() {
    let mut model = LatticeModel::new(2, 1.0, 1.0, 0.1, 1).unwrap();
    model.num_qubits = 3;
    assert!(Hamiltonian::fermi_hubbard(&model).is_err());
}

#[test]
fn lambda_sums_absolute_coefficients() {
    let h: Hamiltonian = [HamiltonianTerm::z(0, -1.0), HamiltonianTerm::x(1, 0.5)]
        .into_iter()
        .collect();
    assert!((h.lambda() - 1.5).abs() < 1e-15);
    assert_eq!(h.constant(), 0.0);
}
