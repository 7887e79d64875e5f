//! Command line handlers. Terminal presentation lives here, the work is
//! done by the library modules.

pub mod args;
mod config;
mod import;
mod normalize;
mod stats;
mod wer;

pub use args::{Cli, CliCommand};
pub use config::handle_config_command;
pub use import::handle_import_command;
pub use normalize::handle_normalize_command;
pub use stats::handle_stats_command;
pub use wer::handle_wer_command;

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::normalizer::NormalizerConfig;
use args::NormalizerCliArgs;

/// Load the config from an explicit path or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config file {:?}", path)),
        None => Config::load().context("Failed to load config"),
    }
}

/// Apply command line overrides on top of the configured normalizer settings.
pub(crate) fn apply_normalizer_args(
    mut config: NormalizerConfig,
    args: &NormalizerCliArgs,
) -> Result<NormalizerConfig> {
    if let Some(language) = args.language.as_deref() {
        config.language = language.parse()?;
    }
    if args.remove_acronyms {
        config.remove_acronyms = true;
    }
    if args.keep_empty {
        config.remove_empty_text = false;
    }
    if !args.blacklist_terms.is_empty() {
        config.blacklist_terms = args.blacklist_terms.clone();
    }
    if let Some(min) = args.min_duration {
        config.min_duration = min;
    }
    if let Some(max) = args.max_duration {
        config.max_duration = max;
    }
    config.validate()?;
    Ok(config)
}
