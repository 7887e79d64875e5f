mod config;
mod diacritics;
mod filter;
mod gate;
mod language;
mod report;
mod stage;
mod text_normalizer;

pub use config::{NormalizerConfig, DEFAULT_MAX_DURATION, DEFAULT_MIN_DURATION};
pub use diacritics::DiacriticFolder;
pub use filter::{CharacterFilter, ACCENTED_LETTERS, CP_PUNCTUATION};
pub use gate::{BlacklistStripper, RejectReason, SentenceGate};
pub use language::Language;
pub use report::{NormalizationReport, RejectedItem};
pub use stage::TextStage;
pub use text_normalizer::{TextNormalizer, Verdict};
