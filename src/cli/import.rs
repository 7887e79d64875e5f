//! CLI handler for converting TSV corpus exports into manifests.

use anyhow::{Context, Result};

use crate::cli::args::ImportCliArgs;
use crate::manifest::{read_tsv, write_manifest, TsvColumns};

pub fn handle_import_command(args: ImportCliArgs) -> Result<()> {
    let mut columns = TsvColumns::new(args.audio_column, args.text_column);
    if !args.no_duration {
        columns = columns.with_duration(args.duration_column);
    }

    let records = read_tsv(&args.input, &args.clips_folder, &columns)
        .with_context(|| format!("Failed to read TSV {:?}", args.input))?;
    write_manifest(&args.output, &records)
        .with_context(|| format!("Failed to write manifest {:?}", args.output))?;

    println!("Imported {} records into {:?}", records.len(), args.output);
    Ok(())
}
