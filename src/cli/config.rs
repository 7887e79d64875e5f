//! CLI handler for showing and creating the config file.

use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::args::ConfigCliArgs;
use crate::cli::load_config;
use crate::config::Config;
use crate::global;

pub fn handle_config_command(args: ConfigCliArgs, config_path: Option<&Path>) -> Result<()> {
    if args.init {
        let target = config_path.map(Path::to_path_buf).or_else(global::config_file);
        if let Some(target) = target.as_deref() {
            if target.exists() && !args.force {
                bail!(
                    "Config file {:?} already exists (use --force to overwrite)",
                    target
                );
            }
        }

        let written = Config::default().save(config_path)?;
        println!("Wrote default config to {:?}", written);
        return Ok(());
    }

    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
