use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CorpusError;

/// Languages the normalizer knows how to fold and filter.
///
/// Bilingual Spanish/Basque corpora should use [`Language::Spanish`], which
/// keeps the accented vowels both languages can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    Spanish,
    Basque,
}

impl Language {
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::Basque => "eu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Language {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" => Ok(Language::Spanish),
            "eu" => Ok(Language::Basque),
            _ => Err(CorpusError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = CorpusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.tag().to_string()
    }
}
