//! Run command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use hubbard_adapter_sim::SimulatorBackend;
use hubbard_hal::{Backend, BackendConfig, BackendFactory};
use hubbard_sim::Experiment;

use super::common::{LatticeArgs, OutputFormat, print_counts, print_distribution, print_json};

/// Execute the run command.
pub async fn execute(
    lattice: &LatticeArgs,
    shots: u32,
    seed: Option<u64>,
    max_qubits: u32,
    format: OutputFormat,
) -> Result<()> {
    let (model, state) = lattice.resolve()?;

    let mut config =
        BackendConfig::new("simulator").with_extra("max_qubits", serde_json::json!(max_qubits));
    if let Some(seed) = seed {
        config = config.with_extra("seed", serde_json::json!(seed));
    }
    let backend = SimulatorBackend::from_config(config)?;
    info!(num_sites = model.num_sites, shots, ?seed, "starting run");

    if format == OutputFormat::Table {
        println!(
            "{} Running {} sites x {} steps on {} ({} shots)",
            style("→").cyan().bold(),
            style(model.num_sites).green(),
            style(model.step_count).green(),
            style(backend.name()).yellow(),
            shots
        );
    }

    let spinner = ProgressBar::new_spinner();
    if format == OutputFormat::Table {
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message("Simulating...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    } else {
        spinner.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let outcome = Experiment::new(&backend).run(&model, state, shots).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    match format {
        OutputFormat::Json => print_json(&outcome),
        OutputFormat::Table => {
            println!(
                "  Circuit: {} qubits, {} gates, depth {}",
                outcome.circuit.num_qubits, outcome.circuit.gate_count, outcome.circuit.depth
            );
            println!(
                "\n{} Results ({} shots, job {}):",
                style("✓").green().bold(),
                outcome.shots,
                outcome.job_id
            );
            print_counts(&outcome.counts, 16);
            print_distribution(&outcome.distribution);
            if let Some(time_ms) = outcome.execution_time_ms {
                println!("\n  Execution time: {} ms", style(time_ms).yellow());
            }
            Ok(())
        }
    }
}
