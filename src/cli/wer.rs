//! CLI handler for WER evaluation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::args::WerCliArgs;
use crate::cli::{apply_normalizer_args, load_config};
use crate::manifest::{read_manifest, write_manifest};
use crate::wer::{AnnotationSummary, WerEvaluator};

pub fn handle_wer_command(args: WerCliArgs, config_path: Option<&Path>) -> Result<()> {
    if args.from_annotations {
        return summarize_annotations(&args);
    }

    let config = load_config(config_path)?;
    let base = apply_normalizer_args(config.normalizer, &args.normalizer)?;

    let mut options = config.evaluation;
    if let Some(field) = args.reference_field {
        options.reference_field = field;
    }
    if let Some(field) = args.hypothesis_field {
        options.hypothesis_field = field;
    }
    if args.cp {
        options.case_and_punctuation = true;
    }

    let records = read_manifest(&args.input)
        .with_context(|| format!("Failed to read manifest {:?}", args.input))?;

    let evaluation = WerEvaluator::new(base, options)
        .evaluate(&records)
        .with_context(|| format!("Failed to evaluate {:?}", args.input))?;

    if let Some(output) = args.output.as_deref() {
        write_manifest(output, &evaluation.records)
            .with_context(|| format!("Failed to write manifest {:?}", output))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation.summary)?);
    } else {
        print_banner(&args.input, &evaluation.summary);
    }

    Ok(())
}

fn summarize_annotations(args: &WerCliArgs) -> Result<()> {
    let records = read_manifest(&args.input)
        .with_context(|| format!("Failed to read manifest {:?}", args.input))?;
    let summary = AnnotationSummary::from_records(&records)
        .with_context(|| format!("Failed to summarize {:?}", args.input))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_banner(&args.input, &summary);
    }
    Ok(())
}

fn print_banner(input: &Path, summary: &dyn std::fmt::Display) {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    println!("=============[ {} ]=============", name);
    println!("{}", summary);
    println!("==============={}===============", "=".repeat(name.len()));
}
