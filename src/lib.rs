//! Transcript normalization and word error rate evaluation for
//! speech-corpus manifests.

pub mod cli;
pub mod config;
pub mod error;
pub mod global;
pub mod manifest;
pub mod normalizer;
pub mod stats;
pub mod wer;

pub use error::{CorpusError, ErrorKind, Result};
pub use manifest::Record;
pub use normalizer::{Language, NormalizerConfig, TextNormalizer};
pub use wer::{WerEvaluation, WerEvaluator, WerOptions, WerSummary};
