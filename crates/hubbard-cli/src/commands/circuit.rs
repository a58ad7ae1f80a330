//! Circuit command implementation.

use anyhow::{Context, Result};
use console::style;

use hubbard_ir::{Circuit, InstructionKind};
use hubbard_sim::{CircuitSummary, Hamiltonian, LatticeModel, TrotterCircuitBuilder};

use super::common::{LatticeArgs, OutputFormat};

/// Execute the circuit command.
pub fn execute(
    lattice: &LatticeArgs,
    format: OutputFormat,
    output: Option<&str>,
    list: bool,
) -> Result<()> {
    let (model, state) = lattice.resolve()?;
    let circuit = TrotterCircuitBuilder::new(model.clone()).build(state)?;

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&circuit)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write output: {path}"))?;
        println!(
            "{} Wrote {} instructions to {}",
            style("✓").green().bold(),
            circuit.len(),
            style(path).green()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => super::common::print_json(&circuit),
        OutputFormat::Table => {
            print_summary(&model, &circuit)?;
            if list {
                print_instructions(&circuit);
            }
            Ok(())
        }
    }
}

fn print_summary(model: &LatticeModel, circuit: &Circuit) -> Result<()> {
    let summary = CircuitSummary::from(circuit);
    let hamiltonian = Hamiltonian::fermi_hubbard(model)?;
    let (alpha, beta) = model.rotation_angles();

    println!(
        "{} Hubbard chain: {} sites, {} steps, dt = {}",
        style("→").cyan().bold(),
        style(model.num_sites).yellow(),
        style(model.step_count).yellow(),
        model.angle_increment
    );
    println!("  J = {}, U = {}", model.hopping_j, model.interaction_u);
    println!("  alpha = {alpha:.6}, beta = {beta:.6}");
    println!(
        "  Hamiltonian: {} Pauli terms, constant {:.4}",
        hamiltonian.n_terms(),
        hamiltonian.constant()
    );
    println!(
        "\n  Circuit '{}': {} qubits, {} clbits, {} gates, depth {}",
        summary.name, summary.num_qubits, summary.num_clbits, summary.gate_count, summary.depth
    );
    for (name, count) in &summary.ops {
        println!("    {:<12} {:>8}", style(name).cyan(), count);
    }
    Ok(())
}

fn print_instructions(circuit: &Circuit) {
    println!();
    for (i, inst) in circuit.instructions().iter().enumerate() {
        let operands: Vec<String> = inst
            .qubits
            .iter()
            .map(|q| circuit.qubits()[q.index()].to_string())
            .collect();
        let label = match &inst.kind {
            InstructionKind::Gate(gate) => gate.to_string(),
            InstructionKind::Initialize(state) => format!("initialize[{}]", state.len()),
            InstructionKind::Measure => format!("measure -> {}", inst.clbits[0]),
            InstructionKind::Barrier => "barrier".to_string(),
        };
        println!("  {i:>6}  {label:<24} {}", operands.join(", "));
    }
}
