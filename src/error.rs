use std::path::PathBuf;

use thiserror::Error;

/// Broad classification of a [`CorpusError`], used by callers that decide
/// whether to fix the configuration, drop a record, or give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    DataIntegrity,
    Io,
    Parse,
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("unsupported language '{0}'; supported languages: 'es' (Spanish), 'eu' (Basque)")]
    UnsupportedLanguage(String),

    #[error("invalid blacklist pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("record {index} has no usable field '{field}'")]
    MissingField { index: usize, field: String },

    #[error("cannot compute WER on an empty batch")]
    EmptyBatch,

    #[error("no records left to evaluate: all {total} were filtered out during normalization")]
    NothingToEvaluate { total: usize },

    #[error("I/O error while {context} {path:?}: {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path:?} at line {line}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed TSV in {path:?} at line {line}: {message}")]
    Tsv {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("malformed config file {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}

impl CorpusError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedLanguage(_) | Self::InvalidPattern { .. } | Self::InvalidConfig { .. } => {
                ErrorKind::Configuration
            }
            Self::MissingField { .. } | Self::EmptyBatch | Self::NothingToEvaluate { .. } => {
                ErrorKind::DataIntegrity
            }
            Self::Io { .. } => ErrorKind::Io,
            Self::Json { .. } | Self::Tsv { .. } | Self::Config { .. } => ErrorKind::Parse,
        }
    }

    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_field(index: usize, field: impl Into<String>) -> Self {
        Self::MissingField {
            index,
            field: field.into(),
        }
    }

    pub(crate) fn tsv(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Tsv {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
