use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CorpusError, Result};
use crate::normalizer::{NormalizerConfig, TextStage};

/// Why an entry was left out of the normalized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Duration,
    Acronym,
    EmptyText,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Duration => write!(f, "duration out of bounds"),
            RejectReason::Acronym => write!(f, "acronym in sentence"),
            RejectReason::EmptyText => write!(f, "no text in sentence"),
        }
    }
}

/// Removes every case-insensitive match of the configured patterns.
#[derive(Debug, Clone, Default)]
pub struct BlacklistStripper {
    patterns: Vec<Regex>,
}

impl BlacklistStripper {
    pub fn new(terms: &[String]) -> Result<Self> {
        let patterns = terms
            .iter()
            .map(|term| {
                RegexBuilder::new(term)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| CorpusError::InvalidPattern {
                        pattern: term.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl TextStage for BlacklistStripper {
    fn apply(&self, text: &str) -> String {
        let mut stripped = text.to_string();
        for pattern in &self.patterns {
            stripped = pattern.replace_all(&stripped, "").into_owned();
        }
        stripped
    }

    fn name(&self) -> &'static str {
        "BlacklistStripper"
    }
}

/// Admission checks that decide whether an entry is kept at all.
#[derive(Debug, Clone)]
pub struct SentenceGate {
    min_duration: f64,
    max_duration: f64,
    acronym_regex: Option<Regex>,
    remove_empty_text: bool,
}

impl SentenceGate {
    pub fn new(config: &NormalizerConfig) -> Result<Self> {
        let acronym_regex = if config.remove_acronyms {
            // A word token with two or more consecutive capitals anywhere in it
            let regex = Regex::new(r"\b\w*[A-Z]{2,}\w*\b").map_err(|source| {
                CorpusError::InvalidPattern {
                    pattern: "acronym".to_string(),
                    source,
                }
            })?;
            Some(regex)
        } else {
            None
        };

        Ok(Self {
            min_duration: config.min_duration,
            max_duration: config.max_duration,
            acronym_regex,
            remove_empty_text: config.remove_empty_text,
        })
    }

    /// Entries without a duration pass.
    pub fn duration_ok(&self, duration: Option<f64>) -> bool {
        match duration {
            Some(d) => (self.min_duration..=self.max_duration).contains(&d),
            None => true,
        }
    }

    pub fn has_acronym(&self, text: &str) -> bool {
        self.acronym_regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(text))
    }

    pub fn is_empty_text(&self, text: &str) -> bool {
        self.remove_empty_text && !text.chars().any(|c| c.is_ascii_alphabetic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bounds_are_inclusive() {
        let config = NormalizerConfig::default().with_duration_bounds(1.0, 10.0);
        let gate = SentenceGate::new(&config).unwrap();

        assert!(gate.duration_ok(Some(1.0)));
        assert!(gate.duration_ok(Some(10.0)));
        assert!(gate.duration_ok(None));
        assert!(!gate.duration_ok(Some(1.0 - 1e-9)));
        assert!(!gate.duration_ok(Some(10.0 + 1e-9)));
        assert!(!gate.duration_ok(Some(f64::NAN)));
    }

    #[test]
    fn test_acronym_detection() {
        let config = NormalizerConfig::default().with_remove_acronyms(true);
        let gate = SentenceGate::new(&config).unwrap();

        assert!(gate.has_acronym("this has NASA in it"));
        assert!(gate.has_acronym("the eITB broadcast"));
        assert!(gate.has_acronym("COVID19 cases"));
        assert!(!gate.has_acronym("this has Nasa in it"));
        assert!(!gate.has_acronym("A B C"));
    }

    #[test]
    fn test_acronym_check_disabled() {
        let gate = SentenceGate::new(&NormalizerConfig::default()).unwrap();
        assert!(!gate.has_acronym("this has NASA in it"));
    }

    #[test]
    fn test_empty_text_needs_latin_letter() {
        let gate = SentenceGate::new(&NormalizerConfig::default()).unwrap();
        assert!(gate.is_empty_text(""));
        assert!(gate.is_empty_text("¿ ! ñ"));
        assert!(!gate.is_empty_text("ñu"));

        let config = NormalizerConfig::default().with_remove_empty_text(false);
        let gate = SentenceGate::new(&config).unwrap();
        assert!(!gate.is_empty_text(""));
    }

    #[test]
    fn test_blacklist_strips_case_insensitively() {
        let stripper =
            BlacklistStripper::new(&[r"\(inint\)".to_string(), r"\-c\}".to_string()]).unwrap();
        assert_eq!(
            stripper.apply("hola (ININT) mundo (Inint) fin-c}"),
            "hola  mundo  fin"
        );
    }

    #[test]
    fn test_invalid_blacklist_pattern() {
        let err = BlacklistStripper::new(&["(unclosed".to_string()]).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidPattern { .. }));
    }
}
