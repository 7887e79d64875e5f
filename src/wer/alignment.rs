//! Word-level Levenshtein alignment.

use serde::Serialize;

/// Edit operations of the cheapest alignment between two token sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EditCounts {
    pub hits: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
}

impl EditCounts {
    pub fn edits(&self) -> usize {
        self.substitutions + self.deletions + self.insertions
    }

    pub fn reference_len(&self) -> usize {
        self.hits + self.substitutions + self.deletions
    }

    pub fn hypothesis_len(&self) -> usize {
        self.hits + self.substitutions + self.insertions
    }

    /// Edits over reference length. An empty reference scores 1.0 against a
    /// non-empty hypothesis and 0.0 against an empty one.
    pub fn wer(&self) -> f64 {
        let reference_len = self.reference_len();
        if reference_len == 0 {
            return if self.hypothesis_len() > 0 { 1.0 } else { 0.0 };
        }
        self.edits() as f64 / reference_len as f64
    }
}

/// Align whitespace-separated tokens with unit costs for every edit.
pub fn align(reference: &str, hypothesis: &str) -> EditCounts {
    let ref_words: Vec<&str> = reference.split_whitespace().collect();
    let hyp_words: Vec<&str> = hypothesis.split_whitespace().collect();
    align_tokens(&ref_words, &hyp_words)
}

pub fn align_tokens(ref_words: &[&str], hyp_words: &[&str]) -> EditCounts {
    let n = ref_words.len();
    let m = hyp_words.len();

    // dp[i][j]: cost of aligning the first i reference and j hypothesis words
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        dp[0][j] = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(ref_words[i - 1] != hyp_words[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1) // deletion
                .min(dp[i][j - 1] + 1) // insertion
                .min(dp[i - 1][j - 1] + cost); // substitution or hit
        }
    }

    let mut counts = EditCounts::default();
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let same = ref_words[i - 1] == hyp_words[j - 1];
            let diagonal = dp[i - 1][j - 1] + usize::from(!same);
            if dp[i][j] == diagonal {
                if same {
                    counts.hits += 1;
                } else {
                    counts.substitutions += 1;
                }
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
            counts.deletions += 1;
            i -= 1;
        } else {
            counts.insertions += 1;
            j -= 1;
        }
    }

    counts
}

/// Word error rate of `hypothesis` against `reference`.
pub fn word_error_rate(reference: &str, hypothesis: &str) -> f64 {
    align(reference, hypothesis).wer()
}
