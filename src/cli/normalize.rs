//! CLI handler for cleaning manifest transcripts.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

use crate::cli::args::NormalizeCliArgs;
use crate::cli::{apply_normalizer_args, load_config};
use crate::manifest::{read_manifest, write_manifest};
use crate::normalizer::{RejectReason, TextNormalizer};

pub fn handle_normalize_command(args: NormalizeCliArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut normalizer_config = apply_normalizer_args(config.normalizer, &args.normalizer)?;
    if let Some(field) = args.field {
        normalizer_config.field = field;
    }
    if args.keep_cp {
        normalizer_config.keep_case_and_punctuation = true;
    }
    if args.detail {
        normalizer_config.verbose_detail = true;
    }

    let records = read_manifest(&args.input)
        .with_context(|| format!("Failed to read manifest {:?}", args.input))?;
    let total = records.len();

    let mut normalizer = TextNormalizer::new(normalizer_config)?;
    let pb = (!args.no_progress).then(|| create_progress_bar(total as u64));

    let mut kept = Vec::with_capacity(total);
    for (index, mut record) in records.into_iter().enumerate() {
        if normalizer.normalize_record(index, &mut record)?.is_kept() {
            kept.push(record);
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    normalizer.log_report();

    write_manifest(&args.output, &kept)
        .with_context(|| format!("Failed to write manifest {:?}", args.output))?;

    let report = normalizer.report();
    info!("Normalized {:?} into {:?}", args.input, args.output);
    println!("Kept {}/{} sentences", kept.len(), total);
    for reason in [
        RejectReason::Duration,
        RejectReason::Acronym,
        RejectReason::EmptyText,
    ] {
        let count = report.rejected(reason);
        if count > 0 {
            println!(
                "  removed ({}): {} ({:.2}%)",
                reason,
                count,
                report.percent(count)
            );
        }
    }

    Ok(())
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("━╸━"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}
