use tracing::debug;

use crate::normalizer::TextStage;

/// Letters allowed on top of ASCII A-Z/a-z in both supported languages.
pub const ACCENTED_LETTERS: &str = "áéíóúüÁÉÍÓÚÜñÑ";

/// Punctuation kept when case and punctuation are preserved.
pub const CP_PUNCTUATION: &str = ".,¿?¡!;:";

/// Whitelist character eraser.
///
/// Every character outside the whitelist becomes a space, whitespace runs are
/// collapsed to one space and the result is trimmed. Without case/punctuation
/// preservation the result is also lower-cased.
#[derive(Debug, Clone)]
pub struct CharacterFilter {
    keep_case_and_punctuation: bool,
}

impl CharacterFilter {
    pub fn new(keep_case_and_punctuation: bool) -> Self {
        Self {
            keep_case_and_punctuation,
        }
    }

    pub fn is_allowed(&self, c: char) -> bool {
        c.is_ascii_alphabetic()
            || c == ' '
            || ACCENTED_LETTERS.contains(c)
            || (self.keep_case_and_punctuation && CP_PUNCTUATION.contains(c))
    }

    pub fn filter(&self, text: &str) -> String {
        let erased: String = text
            .chars()
            .map(|c| if self.is_allowed(c) { c } else { ' ' })
            .collect();

        let collapsed = erased.split_whitespace().collect::<Vec<_>>().join(" ");

        if self.keep_case_and_punctuation {
            collapsed
        } else {
            collapsed.to_lowercase()
        }
    }
}

impl TextStage for CharacterFilter {
    fn apply(&self, text: &str) -> String {
        let filtered = self.filter(text);
        debug!(
            "Filtered {} chars to {} chars",
            text.chars().count(),
            filtered.chars().count()
        );
        filtered
    }

    fn name(&self) -> &'static str {
        "CharacterFilter"
    }
}
