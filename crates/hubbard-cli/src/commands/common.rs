//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::style;

use hubbard_hal::Counts;
use hubbard_ir::StateVector;
use hubbard_sim::{LatticeConfig, LatticeModel, OccupationDistribution};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Lattice parameters. Flags override values from `--config`.
#[derive(Debug, Args)]
pub struct LatticeArgs {
    /// YAML or JSON lattice configuration file
    #[arg(short, long, env = "HUBBARD_CONFIG")]
    pub config: Option<String>,

    /// Number of lattice sites
    #[arg(long, env = "HUBBARD_SITES")]
    pub sites: Option<u32>,

    /// Number of Trotter steps
    #[arg(long, env = "HUBBARD_STEPS")]
    pub steps: Option<u32>,

    /// Time increment per Trotter step
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Hopping amplitude J
    #[arg(long, allow_negative_numbers = true)]
    pub hopping: Option<f64>,

    /// On-site interaction U
    #[arg(long, allow_negative_numbers = true)]
    pub interaction: Option<f64>,
}

impl LatticeArgs {
    /// Merge the config file (or defaults) with command-line overrides.
    pub fn to_config(&self) -> Result<LatticeConfig> {
        let mut config = match &self.config {
            Some(path) => LatticeConfig::from_path(path)
                .with_context(|| format!("Failed to load lattice config: {path}"))?,
            None => LatticeConfig::default(),
        };
        if let Some(sites) = self.sites {
            if sites != config.num_sites {
                // A state sized for the old lattice no longer applies.
                config.initial_state = None;
            }
            config.num_sites = sites;
        }
        if let Some(steps) = self.steps {
            config.step_count = steps;
        }
        if let Some(angle) = self.angle {
            config.angle_increment = angle;
        }
        if let Some(j) = self.hopping {
            config.hopping_j = j;
        }
        if let Some(u) = self.interaction {
            config.interaction_u = u;
        }
        Ok(config)
    }

    /// Resolve the validated model and its starting state.
    pub fn resolve(&self) -> Result<(LatticeModel, StateVector)> {
        Ok(self.to_config()?.into_model()?)
    }
}

/// Load a counts histogram from a JSON object file.
pub fn load_counts(path: &str) -> Result<Counts> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    serde_json::from_str(&source).with_context(|| format!("Invalid counts JSON in {path}"))
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the most frequent outcomes with a bar chart.
pub fn print_counts(counts: &Counts, limit: usize) {
    let sorted = counts.sorted();
    let total = counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(limit) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > limit {
        println!("  ... and {} more outcomes", sorted.len() - limit);
    }
}

/// Print per-site occupation probabilities.
pub fn print_distribution(dist: &OccupationDistribution) {
    println!(
        "\n{} Site occupation ({} shots):",
        style("✓").green().bold(),
        dist.total_shots()
    );
    println!(
        "  {:>4}  {:>7}  {:>7}  {:>7}  {:>7}  {:>7}",
        style("site").bold(),
        "empty",
        "up",
        "down",
        "both",
        "<n>"
    );
    for site in dist.sites() {
        println!(
            "  {:>4}  {:>7.4}  {:>7.4}  {:>7.4}  {:>7.4}  {:>7.4}",
            site.site,
            site.empty,
            site.up,
            site.down,
            site.both,
            style(format!("{:.4}", site.particle_density())).yellow()
        );
    }
    println!(
        "\n  Total particles: {}",
        style(format!("{:.4}", dist.total_particles())).yellow()
    );
}
