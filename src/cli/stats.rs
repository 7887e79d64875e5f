//! CLI handler for manifest duration statistics.

use anyhow::{Context, Result};

use crate::cli::args::StatsCliArgs;
use crate::manifest::read_manifest;
use crate::stats::DurationStats;

pub fn handle_stats_command(args: StatsCliArgs) -> Result<()> {
    for path in &args.manifests {
        let records =
            read_manifest(path).with_context(|| format!("Failed to read manifest {:?}", path))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        println!("=============[ {} ]=============", name);
        match DurationStats::from_records(&records) {
            Some(stats) => println!("{}", stats),
            None => println!("\tNo durations found in {} records.", records.len()),
        }
        println!("==============={}===============\n", "=".repeat(name.len()));
    }

    Ok(())
}
