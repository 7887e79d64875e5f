use tracing::debug;

use crate::normalizer::{Language, TextStage};

/// Substitution entry: every character in the class maps to the replacement.
type Substitution = (&'static str, &'static str);

/// Shared folding table. Greek and Cyrillic letters are transliterated, Latin
/// letters with diacritics that neither Spanish nor Basque use are folded to
/// their base letter. Accented vowels and ñ are left for the whitelist.
const BASE_TABLE: &[Substitution] = &[
    ("Æ", "Ae"),
    ("Œ", "Oe"),
    ("Ж", "Zh"),
    ("Х", "H"),
    ("Щ", "Shch"),
    ("Ш", "Sh"),
    ("Ф", "F"),
    ("Ч", "Ch"),
    ("Ц", "Ts"),
    ("Þ", "Th"),
    ("Α", "A"),
    ("Β", "V"),
    ("Γ", "G"),
    ("Δ", "D"),
    ("Ζ", "Z"),
    ("Η", "I"),
    ("Θ", "Th"),
    ("Κ", "K"),
    ("Λ", "L"),
    ("Μ", "M"),
    ("Ν", "N"),
    ("Ξ", "Ks"),
    ("Π", "P"),
    ("Ρ", "R"),
    ("Σ", "S"),
    ("Τ", "T"),
    ("Υ", "I"),
    ("Φ", "F"),
    ("Χ", "J"),
    ("Ψ", "Ps"),
    ("Ω", "O"),
    ("ß", "ss"),
    ("ж", "zh"),
    ("х", "h"),
    ("щ", "shch"),
    ("ш", "sh"),
    ("ф", "f"),
    ("ч", "ch"),
    ("ц", "ts"),
    ("ð", "d"),
    ("ђ", "dj"),
    ("α", "a"),
    ("β", "v"),
    ("γ", "g"),
    ("δ", "d"),
    ("ζ", "z"),
    ("η", "i"),
    ("θ", "th"),
    ("κ", "k"),
    ("λ", "l"),
    ("μ", "m"),
    ("ν", "n"),
    ("ξ", "ks"),
    ("π", "p"),
    ("ρ", "r"),
    ("σς", "s"),
    ("υ", "u"),
    ("φ", "f"),
    ("χ", "j"),
    ("ψ", "ps"),
    ("ÈËÊЕЭ", "E"),
    ("АÃÂÀÄÅ", "A"),
    ("ÙÛŪ", "U"),
    ("ÔÖÒÕØΟ", "O"),
    ("ÇĆČ", "C"),
    ("ÏÌÎĪ", "I"),
    ("ÑŃǸ", "Ñ"),
    ("ÝŶŸ", "Y"),
    ("èëēêе", "e"),
    ("аãâāàä", "a"),
    ("ùūû", "u"),
    ("ôōòöõ", "o"),
    ("ćç", "c"),
    ("ïīìî", "i"),
    ("ż", "z"),
    ("\u{a0}", " "),
];

/// Basque spells without acute accents or diaeresis, so those vowels are
/// folded too instead of being kept by the whitelist.
const BASQUE_OVERRIDES: &[Substitution] = &[
    ("É", "E"),
    ("Á", "A"),
    ("ÚÜ", "U"),
    ("Ó", "O"),
    ("Í", "I"),
    ("é", "e"),
    ("á", "a"),
    ("úü", "u"),
    ("ó", "o"),
    ("í", "i"),
];

fn overrides_for(language: Language) -> &'static [Substitution] {
    match language {
        Language::Spanish => &[],
        Language::Basque => BASQUE_OVERRIDES,
    }
}

fn lookup(table: &'static [Substitution], c: char) -> Option<&'static str> {
    table
        .iter()
        .find(|(class, _)| class.contains(c))
        .map(|(_, replacement)| *replacement)
}

/// Character substitution driven by [`BASE_TABLE`] plus the language's
/// override layer. The override layer wins on characters present in both.
/// Characters not present in either table pass through unchanged.
#[derive(Debug, Clone)]
pub struct DiacriticFolder {
    overrides: &'static [Substitution],
}

impl DiacriticFolder {
    pub fn new(language: Language) -> Self {
        Self {
            overrides: overrides_for(language),
        }
    }

    /// Replacement for a single character, if any table maps it.
    pub fn replacement(&self, c: char) -> Option<&'static str> {
        lookup(self.overrides, c).or_else(|| lookup(BASE_TABLE, c))
    }

    pub fn fold(&self, text: &str) -> String {
        let mut folded = String::with_capacity(text.len());
        for c in text.chars() {
            match self.replacement(c) {
                Some(replacement) => folded.push_str(replacement),
                None => folded.push(c),
            }
        }
        folded
    }
}

impl TextStage for DiacriticFolder {
    fn apply(&self, text: &str) -> String {
        let folded = self.fold(text);
        if folded != text {
            debug!("Folded '{}' to '{}'", text, folded);
        }
        folded
    }

    fn name(&self) -> &'static str {
        "DiacriticFolder"
    }
}
