//! Decode command implementation.

use anyhow::Result;
use console::style;

use hubbard_sim::DensityDecoder;

use super::common::{OutputFormat, load_counts, print_counts, print_distribution, print_json};

/// Execute the decode command.
pub fn execute(input: &str, sites: u32, format: OutputFormat) -> Result<()> {
    let counts = load_counts(input)?;
    let dist = DensityDecoder::decode(&counts, sites)?;

    match format {
        OutputFormat::Json => print_json(&dist),
        OutputFormat::Table => {
            println!(
                "{} Decoding {} ({} outcomes, {} sites)",
                style("→").cyan().bold(),
                style(input).green(),
                counts.len(),
                sites
            );
            print_counts(&counts, 8);
            print_distribution(&dist);
            Ok(())
        }
    }
}
