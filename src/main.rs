use anyhow::Result;
use clap::Parser;
use speech_manifest::cli::{
    handle_config_command, handle_import_command, handle_normalize_command, handle_stats_command, handle_wer_command,
    Cli, CliCommand,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        CliCommand::Normalize(args) => handle_normalize_command(args, config_path),
        CliCommand::Wer(args) => handle_wer_command(args, config_path),
        CliCommand::Import(args) => handle_import_command(args),
        CliCommand::Stats(args) => handle_stats_command(args),
        CliCommand::Config(args) => handle_config_command(args, config_path),
        CliCommand::Version => {
            println!("speech-manifest {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
