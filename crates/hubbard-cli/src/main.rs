//! Hubbard Command-Line Interface
//!
//! Generates Trotter circuits for a one-dimensional Fermi-Hubbard chain, runs
//! them on the local statevector simulator and decodes outcome histograms
//! into per-site occupation probabilities.
//!
//! ```text
//! hubbard circuit --sites 3 --steps 4 --format json
//! hubbard run --sites 3 --steps 4 --shots 4096 --seed 7
//! hubbard decode --input counts.json --sites 3
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{LatticeArgs, OutputFormat};
use commands::{circuit, decode, run};

/// Hubbard - Trotterized Fermi-Hubbard chain experiments
#[derive(Parser)]
#[command(name = "hubbard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Trotter circuit for a lattice
    Circuit {
        #[command(flatten)]
        lattice: LatticeArgs,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write the circuit JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// List every instruction in table mode
        #[arg(long)]
        list: bool,
    },

    /// Simulate a lattice and decode the measured occupations
    Run {
        #[command(flatten)]
        lattice: LatticeArgs,

        /// Number of shots
        #[arg(short, long, default_value = "1024", env = "HUBBARD_SHOTS")]
        shots: u32,

        /// Sampling seed for reproducible counts
        #[arg(long, env = "HUBBARD_SEED")]
        seed: Option<u64>,

        /// Simulator register limit
        #[arg(long, default_value = "20")]
        max_qubits: u32,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Decode an externally produced counts file
    Decode {
        /// JSON object mapping bitstrings to counts
        #[arg(short, long)]
        input: String,

        /// Number of lattice sites
        #[arg(long)]
        sites: u32,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Circuit {
            lattice,
            format,
            output,
            list,
        } => circuit::execute(&lattice, format, output.as_deref(), list),

        Commands::Run {
            lattice,
            shots,
            seed,
            max_qubits,
            format,
        } => run::execute(&lattice, shots, seed, max_qubits, format).await,

        Commands::Decode {
            input,
            sites,
            format,
        } => decode::execute(&input, sites, format),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
