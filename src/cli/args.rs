use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "speech-manifest")]
#[command(about = "Normalize speech-corpus manifests and score transcriptions", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Clean the transcripts of a manifest
    Normalize(NormalizeCliArgs),
    /// Compute word error rates of predictions against references
    Wer(WerCliArgs),
    /// Convert a tab-separated corpus export into a manifest
    Import(ImportCliArgs),
    /// Show duration statistics of manifests
    Stats(StatsCliArgs),
    /// Show the effective configuration or write a default config file
    Config(ConfigCliArgs),
    /// Print version information
    Version,
}

/// Normalizer settings shared by `normalize` and `wer`. Unset flags fall
/// back to the config file.
#[derive(ClapArgs, Debug, Default)]
pub struct NormalizerCliArgs {
    /// Language tag: es (Spanish, also for bilingual data) or eu (Basque)
    #[arg(short, long)]
    pub language: Option<String>,
    /// Drop sentences containing acronyms
    #[arg(long)]
    pub remove_acronyms: bool,
    /// Keep sentences left without letters after cleaning
    #[arg(long)]
    pub keep_empty: bool,
    /// Regex removed from the text before cleaning (case-insensitive, repeatable)
    #[arg(long = "blacklist", value_name = "PATTERN")]
    pub blacklist_terms: Vec<String>,
    /// Minimum audio duration in seconds
    #[arg(long)]
    pub min_duration: Option<f64>,
    /// Maximum audio duration in seconds
    #[arg(long)]
    pub max_duration: Option<f64>,
}

#[derive(ClapArgs, Debug)]
pub struct NormalizeCliArgs {
    /// Input manifest (JSON lines)
    pub input: PathBuf,
    /// Output manifest
    #[arg(short, long)]
    pub output: PathBuf,
    /// Field holding the text to clean
    #[arg(short, long)]
    pub field: Option<String>,
    /// Preserve capitalization and punctuation
    #[arg(long)]
    pub keep_cp: bool,
    /// Report every removed sentence
    #[arg(long)]
    pub detail: bool,
    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
    #[command(flatten)]
    pub normalizer: NormalizerCliArgs,
}

#[derive(ClapArgs, Debug)]
pub struct WerCliArgs {
    /// Manifest with reference and predicted text
    pub input: PathBuf,
    /// Write the records annotated with their WER here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Field holding the reference text
    #[arg(long)]
    pub reference_field: Option<String>,
    /// Field holding the predicted text
    #[arg(long)]
    pub hypothesis_field: Option<String>,
    /// Also compute WER with capitalization and punctuation
    #[arg(long)]
    pub cp: bool,
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
    /// Average the `wer`/`wer_cp` fields already stored in the manifest
    #[arg(long, conflicts_with = "output")]
    pub from_annotations: bool,
    #[command(flatten)]
    pub normalizer: NormalizerCliArgs,
}

#[derive(ClapArgs, Debug)]
pub struct ImportCliArgs {
    /// Tab-separated file with a header line
    pub input: PathBuf,
    /// Output manifest
    #[arg(short, long)]
    pub output: PathBuf,
    /// Folder prepended to the audio file names
    #[arg(long, default_value = "")]
    pub clips_folder: String,
    #[arg(long, default_value = "file_name")]
    pub audio_column: String,
    #[arg(long, default_value = "transcription")]
    pub text_column: String,
    #[arg(long, default_value = "duration")]
    pub duration_column: String,
    /// The export has no duration column
    #[arg(long)]
    pub no_duration: bool,
}

#[derive(ClapArgs, Debug)]
pub struct StatsCliArgs {
    /// Manifests to summarize
    #[arg(required = true)]
    pub manifests: Vec<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ConfigCliArgs {
    /// Write the default config file (to --config or the default location)
    #[arg(long)]
    pub init: bool,
    /// Overwrite an existing file with --init
    #[arg(long)]
    pub force: bool,
}
