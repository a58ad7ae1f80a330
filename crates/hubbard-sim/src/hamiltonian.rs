//! Qubit Hamiltonian of the Fermi-Hubbard chain.
//!
//! Under the Jordan-Wigner mapping with the spin-up register on qubits
//! `0..L` and spin-down on `L..2L`, the open-chain Hubbard model
//!
//!   H = -J Σ_{j,σ} (c†_{j,σ} c_{j+1,σ} + h.c.) + U Σ_j n_{j↑} n_{j↓}
//!
//! becomes a sum of Pauli strings. Nearest-neighbour hopping within one
//! spin register needs no Z string:
//!
//!   hopping(j, j+1) → (J/2)(X_j X_{j+1} + Y_j Y_{j+1})
//!   onsite(j)       → (U/4)(I - Z_j - Z_{L+j} + Z_j Z_{L+j})
//!
//! The identity parts are collected into [`Hamiltonian::constant`].
//!
//! # Example
//!
//! ```rust
//! use hubbard_sim::hamiltonian::{Hamiltonian, HamiltonianTerm};
//!
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::zz(0, 1, -1.0),
//!     HamiltonianTerm::x(0, 0.5),
//! ]);
//! assert_eq!(h.n_terms(), 2);
//! assert_eq!(h.min_qubits(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::lattice::LatticeModel;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

/// A tensor product of Pauli operators, identities omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    /// Non-identity factors, sorted by qubit index.
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// Build from `(qubit, op)` pairs; identities are dropped.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// Non-identity factors.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.ops.len()
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Highest qubit referenced.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }
}

/// A weighted Pauli string `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    pub coeff: f64,
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// `coeff · Z_q`.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// `coeff · X_q`.
    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }

    /// `coeff · Z_a Z_b`.
    pub fn zz(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::two_body(q0, q1, PauliOp::Z, coeff)
    }

    /// `coeff · X_a X_b`.
    pub fn xx(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::two_body(q0, q1, PauliOp::X, coeff)
    }

    /// `coeff · Y_a Y_b`.
    pub fn yy(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::two_body(q0, q1, PauliOp::Y, coeff)
    }

    fn two_body(q0: u32, q1: u32, op: PauliOp, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(q0, op), (q1, op)]))
    }
}

/// `H = constant + Σ_k c_k P_k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
    constant: f64,
}

impl Hamiltonian {
    /// Create from a list of terms with no constant offset.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        Self {
            terms,
            constant: 0.0,
        }
    }

    /// The Jordan-Wigner Hamiltonian of `model`.
    ///
    /// Hopping terms come first, ordered by site then spin, followed by the
    /// on-site terms of each site.
    pub fn fermi_hubbard(model: &LatticeModel) -> SimResult<Self> {
        model.validate()?;
        let l = model.num_sites;
        let half_j = model.hopping_j / 2.0;
        let quarter_u = model.interaction_u / 4.0;

        let mut terms = Vec::new();
        for j in 0..l.saturating_sub(1) {
            for offset in [0, l] {
                let (a, b) = (offset + j, offset + j + 1);
                terms.push(HamiltonianTerm::xx(a, b, half_j));
                terms.push(HamiltonianTerm::yy(a, b, half_j));
            }
        }
        for j in 0..l {
            terms.push(HamiltonianTerm::z(j, -quarter_u));
            terms.push(HamiltonianTerm::z(l + j, -quarter_u));
            terms.push(HamiltonianTerm::zz(j, l + j, quarter_u));
        }

        Ok(Self {
            terms,
            constant: quarter_u * f64::from(l),
        })
    }

    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Identity coefficient.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// `Σ |c_k|`, an upper bound on the spectral norm of the non-constant part.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// Register width needed to hold every term.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Energy of a computational basis state given as an outcome string.
    ///
    /// Only diagonal (`Z`-only) terms contribute; character `k` is qubit `k`.
    pub fn diagonal_energy(&self, bitstring: &str) -> f64 {
        let bits = bitstring.as_bytes();
        let z = |q: u32| match bits.get(q as usize) {
            Some(b'1') => -1.0,
            _ => 1.0,
        };
        self.constant
            + self
                .terms
                .iter()
                .filter(|t| t.pauli.ops().iter().all(|(_, op)| *op == PauliOp::Z))
                .map(|t| t.coeff * t.pauli.ops().iter().map(|(q, _)| z(*q)).product::<f64>())
                .sum::<f64>()
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self::from_terms(iter.into_iter().collect())
    }
}
