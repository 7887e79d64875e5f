use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, Result};
use crate::manifest::TEXT_FIELD;
use crate::normalizer::Language;

pub const DEFAULT_MIN_DURATION: f64 = 0.025;
pub const DEFAULT_MAX_DURATION: f64 = 240.0;

/// Settings for one [`TextNormalizer`](crate::normalizer::TextNormalizer).
///
/// A config is scoped to a single `field`. To normalize several fields with
/// otherwise identical settings, derive per-field copies with
/// [`NormalizerConfig::for_field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub language: Language,
    pub field: String,
    /// Keep letter case and `. , ¿ ? ¡ ! ; :`; otherwise lower-case and strip them.
    pub keep_case_and_punctuation: bool,
    /// Reject entries with a token holding two or more consecutive capitals.
    pub remove_acronyms: bool,
    /// Reject entries left without any Latin letter after filtering.
    pub remove_empty_text: bool,
    /// Case-insensitive regex patterns removed before filtering.
    pub blacklist_terms: Vec<String>,
    /// Inclusive duration bounds in seconds.
    pub min_duration: f64,
    pub max_duration: f64,
    pub verbose: bool,
    pub verbose_detail: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            language: Language::Spanish,
            field: TEXT_FIELD.to_string(),
            keep_case_and_punctuation: false,
            remove_acronyms: false,
            remove_empty_text: true,
            blacklist_terms: Vec::new(),
            min_duration: DEFAULT_MIN_DURATION,
            max_duration: DEFAULT_MAX_DURATION,
            verbose: true,
            verbose_detail: false,
        }
    }
}

impl NormalizerConfig {
    /// Default settings for a language tag such as `"es"` or `"eu"`.
    pub fn new(language: &str) -> Result<Self> {
        Ok(Self::for_language(language.parse()?))
    }

    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Default::default()
        }
    }

    /// Copy of this config scoped to another field.
    pub fn for_field(&self, field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..self.clone()
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn with_keep_case_and_punctuation(mut self, keep: bool) -> Self {
        self.keep_case_and_punctuation = keep;
        self
    }

    pub fn with_remove_acronyms(mut self, remove: bool) -> Self {
        self.remove_acronyms = remove;
        self
    }

    pub fn with_remove_empty_text(mut self, remove: bool) -> Self {
        self.remove_empty_text = remove;
        self
    }

    pub fn with_blacklist_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_duration_bounds(mut self, min_duration: f64, max_duration: f64) -> Self {
        self.min_duration = min_duration;
        self.max_duration = max_duration;
        self
    }

    pub fn with_verbose(mut self, verbose: bool, detail: bool) -> Self {
        self.verbose = verbose;
        self.verbose_detail = detail;
        self
    }

    /// Same settings with all diagnostics sent to debug level.
    pub fn quiet(self) -> Self {
        self.with_verbose(false, false)
    }

    pub fn validate(&self) -> Result<()> {
        if self.field.is_empty() {
            return Err(CorpusError::invalid_config("text field name is empty"));
        }
        if self.min_duration.is_nan() || self.max_duration.is_nan() {
            return Err(CorpusError::invalid_config("duration bounds must be numbers"));
        }
        if self.min_duration > self.max_duration {
            return Err(CorpusError::invalid_config(format!(
                "min_duration ({}) is greater than max_duration ({})",
                self.min_duration, self.max_duration
            )));
        }
        Ok(())
    }
}
