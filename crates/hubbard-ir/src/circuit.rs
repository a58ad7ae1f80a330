//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{RotationAxis, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};
use crate::state::{StateVector, dimension};

/// A quantum circuit.
///
/// Instructions are kept in program order; the order is the execution order
/// handed to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    fn next_qubit_id(&self) -> QubitId {
        QubitId(self.qubits.len() as u32)
    }

    fn next_clbit_id(&self) -> ClbitId {
        ClbitId(self.clbits.len() as u32)
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.next_qubit_id();
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = self.next_qubit_id();
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = self.next_clbit_id();
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = self.next_clbit_id();
            self.clbits.push(Clbit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        let num_qubits = self.qubits.len();
        if let Some(&qubit) = instruction.qubits.iter().find(|q| q.index() >= num_qubits) {
            return Err(IrError::QubitNotFound {
                qubit,
                gate_name: Some(instruction.name().to_string()),
            });
        }
        let num_clbits = self.clbits.len();
        if let Some(&clbit) = instruction.clbits.iter().find(|c| c.index() >= num_clbits) {
            return Err(IrError::ClbitNotFound { clbit });
        }
        self.instructions.push(instruction);
        Ok(())
    }

    // =========================================================================
    // State preparation
    // =========================================================================

    /// Load `state` into every qubit of the circuit.
    pub fn initialize(&mut self, state: StateVector) -> IrResult<&mut Self> {
        let expected = dimension(self.qubits.len() as u32)?;
        if state.len() != expected {
            return Err(IrError::StateDimensionMismatch {
                expected,
                got: state.len(),
            });
        }
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::initialize(state, qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply a rotation about `axis`.
    pub fn rotation(&mut self, axis: RotationAxis, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        let gate = StandardGate::rotation(axis, theta);
        if !theta.is_finite() {
            return Err(IrError::NonFiniteAngle {
                gate_name: gate.name().to_string(),
                angle: theta,
            });
        }
        self.apply(Instruction::single_qubit_gate(gate, qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.rotation(RotationAxis::X, theta, qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.rotation(RotationAxis::Y, theta, qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.rotation(RotationAxis::Z, theta, qubit)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure qubit `i` into classical bit `i` for every qubit, in index order.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }
        let pairs: Vec<_> = self
            .qubits
            .iter()
            .zip(&self.clbits)
            .map(|(q, c)| (q.id, c.id))
            .collect();
        for (qubit, clbit) in pairs {
            self.apply(Instruction::measure(qubit, clbit))?;
        }
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Total number of instructions, including initialization, barriers and
    /// measurements.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if no instruction has been appended.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of rotation gates.
    pub fn gate_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Instruction counts keyed by name, sorted by name.
    pub fn count_ops(&self) -> Vec<(String, usize)> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        let mut ops: Vec<_> = counts
            .into_iter()
            .map(|(name, n)| (name.to_string(), n))
            .collect();
        ops.sort();
        ops
    }

    /// The state loaded by the leading initialization instruction, if any.
    pub fn initial_state(&self) -> Option<&StateVector> {
        self.instructions.iter().find_map(|inst| match &inst.kind {
            InstructionKind::Initialize(state) => Some(state),
            _ => None,
        })
    }

    /// Get the circuit depth.
    ///
    /// Every gate, measurement and initialization occupies one layer on each
    /// of its qubits. A barrier aligns its qubits to the deepest among them
    /// without adding a layer.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.qubits.len()];
        for inst in &self.instructions {
            let current = inst
                .qubits
                .iter()
                .map(|q| levels[q.index()])
                .max()
                .unwrap_or(0);
            let next = if inst.is_barrier() { current } else { current + 1 };
            for q in &inst.qubits {
                levels[q.index()] = next;
            }
        }
        levels.into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let up = circuit.add_qreg("up", 3);
        let down = circuit.add_qreg("down", 3);
        let creg = circuit.add_creg("c", 6);

        assert_eq!(up, vec![QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(down[0], QubitId(3));
        assert_eq!(creg.len(), 6);
        assert_eq!(format!("{}", circuit.qubits()[4]), "down[1]");
    }

    #[test]
    fn test_fluent_rotations() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .rx(PI / 2.0, QubitId(0))
            .unwrap()
            .ry(-0.3, QubitId(1))
            .unwrap()
            .rz(0.7, QubitId(0))
            .unwrap();

        assert_eq!(circuit.gate_count(), 3);
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_unknown_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        assert!(matches!(
            circuit.rx(0.1, QubitId(2)),
            Err(IrError::QubitNotFound { qubit: QubitId(2), .. })
        ));
        assert!(matches!(
            circuit.measure(QubitId(0), ClbitId(5)),
            Err(IrError::ClbitNotFound { .. })
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        assert!(matches!(
            circuit.rz(f64::NAN, QubitId(0)),
            Err(IrError::NonFiniteAngle { .. })
        ));
    }

    #[test]
    fn test_initialize_checks_dimension() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let wrong = StateVector::basis(3, 0).unwrap();
        assert!(matches!(
            circuit.initialize(wrong),
            Err(IrError::StateDimensionMismatch { expected: 4, got: 8 })
        ));

        let state = StateVector::basis(2, 2).unwrap();
        circuit.initialize(state.clone()).unwrap();
        assert_eq!(circuit.initial_state(), Some(&state));
        assert_eq!(circuit.instructions()[0].qubits.len(), 2);
    }

    #[test]
    fn test_measure_all_orders_by_index() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.barrier_all().unwrap().measure_all().unwrap();

        assert_eq!(circuit.num_clbits(), 3);
        let measures: Vec<_> = circuit
            .instructions()
            .iter()
            .filter(|i| i.is_measure())
            .map(|i| (i.qubits[0].0, i.clbits[0].0))
            .collect();
        assert_eq!(measures, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_barrier_does_not_add_depth() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit.rx(0.1, QubitId(0)).unwrap();
        circuit.rx(0.1, QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.measure_all().unwrap();

        // rx, rx, then both measures aligned after the barrier.
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_count_ops_sorted() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit.rz(0.1, QubitId(0)).unwrap();
        circuit.rx(0.1, QubitId(0)).unwrap();
        circuit.rx(0.2, QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();

        assert_eq!(
            circuit.count_ops(),
            vec![
                ("measure".to_string(), 1),
                ("rx".to_string(), 2),
                ("rz".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let mut circuit = Circuit::with_size("json", 1, 1);
        circuit
            .initialize(StateVector::basis(1, 1).unwrap())
            .unwrap()
            .ry(0.25, QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }
}
