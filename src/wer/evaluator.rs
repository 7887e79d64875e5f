use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

use crate::error::{CorpusError, Result};
use crate::manifest::{Record, TEXT_FIELD};
use crate::normalizer::{NormalizerConfig, TextNormalizer, Verdict};
use crate::wer::word_error_rate;

pub const WER_FIELD: &str = "wer";
pub const WER_CP_FIELD: &str = "wer_cp";
pub const DEFAULT_HYPOTHESIS_FIELD: &str = "pred_text";

/// Which record fields hold the texts to compare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WerOptions {
    pub reference_field: String,
    pub hypothesis_field: String,
    /// Also score with case and punctuation preserved
    pub case_and_punctuation: bool,
    /// Fields for the case-preserving score; fall back to the plain fields
    pub reference_cp_field: Option<String>,
    pub hypothesis_cp_field: Option<String>,
}

impl Default for WerOptions {
    fn default() -> Self {
        Self {
            reference_field: TEXT_FIELD.to_string(),
            hypothesis_field: DEFAULT_HYPOTHESIS_FIELD.to_string(),
            case_and_punctuation: false,
            reference_cp_field: None,
            hypothesis_cp_field: None,
        }
    }
}

impl WerOptions {
    pub fn with_fields(mut self, reference: impl Into<String>, hypothesis: impl Into<String>) -> Self {
        self.reference_field = reference.into();
        self.hypothesis_field = hypothesis.into();
        self
    }

    pub fn with_case_and_punctuation(mut self, enabled: bool) -> Self {
        self.case_and_punctuation = enabled;
        self
    }

    pub fn with_cp_fields(mut self, reference: impl Into<String>, hypothesis: impl Into<String>) -> Self {
        self.case_and_punctuation = true;
        self.reference_cp_field = Some(reference.into());
        self.hypothesis_cp_field = Some(hypothesis.into());
        self
    }

    fn cp_fields(&self) -> Option<(&str, &str)> {
        self.case_and_punctuation.then(|| {
            (
                self.reference_cp_field
                    .as_deref()
                    .unwrap_or(&self.reference_field),
                self.hypothesis_cp_field
                    .as_deref()
                    .unwrap_or(&self.hypothesis_field),
            )
        })
    }

    fn required_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.reference_field.as_str(), self.hypothesis_field.as_str()];
        if let Some((reference, hypothesis)) = self.cp_fields() {
            for field in [reference, hypothesis] {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }
        fields
    }
}

/// Corpus summary of an evaluation.
///
/// `mean_*` averages the per-sentence WER; `total_*` is a single WER over the
/// concatenation of every reference and every hypothesis, so long sentences
/// weigh more.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WerSummary {
    pub sentences: usize,
    pub filtered_out: usize,
    pub mean_wer: f64,
    pub total_wer: f64,
    pub mean_wer_cp: Option<f64>,
    pub total_wer_cp: Option<f64>,
}

impl fmt::Display for WerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mean_cp) = self.mean_wer_cp {
            writeln!(f, "\t Mean WER C&P: {:.2} %", mean_cp * 100.0)?;
        }
        writeln!(f, "\t     Mean WER: {:.2} %", self.mean_wer * 100.0)?;
        if let Some(total_cp) = self.total_wer_cp {
            writeln!(f, "\tTotal WER C&P: {:.2} %", total_cp * 100.0)?;
        }
        writeln!(f, "\t    Total WER: {:.2} %", self.total_wer * 100.0)?;
        write!(
            f,
            "\t    Sentences: {} ({} filtered out)",
            self.sentences, self.filtered_out
        )
    }
}

/// Annotated records plus the corpus summary.
#[derive(Debug, Clone)]
pub struct WerEvaluation {
    /// Surviving input records, unnormalized, with `wer` (and `wer_cp`) added
    pub records: Vec<Record>,
    pub summary: WerSummary,
}

/// Mean WER of a manifest whose records already carry `wer` (and `wer_cp`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationSummary {
    pub sentences: usize,
    pub mean_wer: f64,
    pub mean_wer_cp: Option<f64>,
}

impl AnnotationSummary {
    /// Averages the stored scores without re-normalizing anything. `wer_cp`
    /// is averaged when the first record has it, and then every record must.
    pub fn from_records(records: &[Record]) -> Result<Self> {
        let first = records.first().ok_or(CorpusError::EmptyBatch)?;
        let with_cp = first.get(WER_CP_FIELD).is_some();

        let score = |index: usize, record: &Record, field: &str| {
            record
                .get(field)
                .and_then(Value::as_f64)
                .ok_or_else(|| CorpusError::missing_field(index, field))
        };

        let mut wer_sum = 0.0;
        let mut wer_cp_sum = 0.0;
        for (index, record) in records.iter().enumerate() {
            wer_sum += score(index, record, WER_FIELD)?;
            if with_cp {
                wer_cp_sum += score(index, record, WER_CP_FIELD)?;
            }
        }

        let count = records.len() as f64;
        Ok(Self {
            sentences: records.len(),
            mean_wer: wer_sum / count,
            mean_wer_cp: with_cp.then(|| wer_cp_sum / count),
        })
    }
}

impl fmt::Display for AnnotationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mean_cp) = self.mean_wer_cp {
            writeln!(f, "\t Mean WER C&P: {:.2} %", mean_cp * 100.0)?;
        }
        writeln!(f, "\t     Mean WER: {:.2} %", self.mean_wer * 100.0)?;
        write!(f, "\t    Sentences: {}", self.sentences)
    }
}

/// Running sums for one scoring variant. The corpus texts are kept as two
/// space-joined buffers in record order.
#[derive(Default)]
struct Accumulator {
    sentence_wers: Vec<f64>,
    references: String,
    hypotheses: String,
}

impl Accumulator {
    fn push(&mut self, reference: &str, hypothesis: &str) -> f64 {
        let wer = word_error_rate(reference, hypothesis);
        if !self.sentence_wers.is_empty() {
            self.references.push(' ');
            self.hypotheses.push(' ');
        }
        self.sentence_wers.push(wer);
        self.references.push_str(reference);
        self.hypotheses.push_str(hypothesis);
        wer
    }

    fn mean(&self) -> f64 {
        self.sentence_wers.iter().sum::<f64>() / self.sentence_wers.len() as f64
    }

    fn total(&self) -> f64 {
        word_error_rate(&self.references, &self.hypotheses)
    }
}

/// Field-scoped normalizers for one scoring variant.
struct FieldPair {
    reference: TextNormalizer,
    hypothesis: TextNormalizer,
}

impl FieldPair {
    fn new(base: &NormalizerConfig, reference: &str, hypothesis: &str, keep_cp: bool) -> Result<Self> {
        let config = |field: &str| {
            base.for_field(field)
                .with_keep_case_and_punctuation(keep_cp)
                .quiet()
        };
        // An empty prediction is a valid hypothesis scoring as all deletions,
        // so only the reference goes through the empty-text check.
        Ok(Self {
            reference: TextNormalizer::new(config(reference))?,
            hypothesis: TextNormalizer::new(config(hypothesis).with_remove_empty_text(false))?,
        })
    }

    /// Normalize both fields of a working copy; `None` if either is filtered out.
    fn normalize(&mut self, index: usize, record: &Record) -> Result<Option<(String, String)>> {
        let mut working = record.clone();
        if self.reference.normalize_record(index, &mut working)? != Verdict::Kept {
            return Ok(None);
        }
        if self.hypothesis.normalize_record(index, &mut working)? != Verdict::Kept {
            return Ok(None);
        }

        let reference_field = &self.reference.config().field;
        let hypothesis_field = &self.hypothesis.config().field;
        let reference = working
            .text(reference_field)
            .ok_or_else(|| CorpusError::missing_field(index, reference_field.as_str()))?;
        let hypothesis = working
            .text(hypothesis_field)
            .ok_or_else(|| CorpusError::missing_field(index, hypothesis_field.as_str()))?;
        Ok(Some((reference.to_string(), hypothesis.to_string())))
    }
}

/// Scores hypotheses against references after normalizing both.
#[derive(Debug, Clone)]
pub struct WerEvaluator {
    base: NormalizerConfig,
    options: WerOptions,
}

impl WerEvaluator {
    /// `base` provides language, acronym, blacklist and duration settings; its
    /// field and case/punctuation settings are overridden per scored field.
    pub fn new(base: NormalizerConfig, options: WerOptions) -> Self {
        Self { base, options }
    }

    pub fn options(&self) -> &WerOptions {
        &self.options
    }

    /// Evaluate a batch. The caller's records are not modified.
    pub fn evaluate(&self, records: &[Record]) -> Result<WerEvaluation> {
        if records.is_empty() {
            return Err(CorpusError::EmptyBatch);
        }
        self.check_fields(records)?;

        let mut plain = FieldPair::new(
            &self.base,
            &self.options.reference_field,
            &self.options.hypothesis_field,
            false,
        )?;
        let mut case_preserving = match self.options.cp_fields() {
            Some((reference, hypothesis)) => {
                Some(FieldPair::new(&self.base, reference, hypothesis, true)?)
            }
            None => None,
        };

        let mut plain_acc = Accumulator::default();
        let mut cp_acc = Accumulator::default();
        let mut annotated = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let Some((reference, hypothesis)) = plain.normalize(index, record)? else {
                continue;
            };

            let cp_texts = match case_preserving.as_mut() {
                Some(pair) => match pair.normalize(index, record)? {
                    Some(texts) => Some(texts),
                    None => continue,
                },
                None => None,
            };

            let mut output = record.clone();
            let wer = plain_acc.push(&reference, &hypothesis);
            output.insert(WER_FIELD, wer);
            if let Some((reference_cp, hypothesis_cp)) = cp_texts {
                let wer_cp = cp_acc.push(&reference_cp, &hypothesis_cp);
                output.insert(WER_CP_FIELD, wer_cp);
            }
            debug!("Record {}: WER {:.4}", index, wer);
            annotated.push(output);
        }

        if annotated.is_empty() {
            return Err(CorpusError::NothingToEvaluate {
                total: records.len(),
            });
        }

        let with_cp = case_preserving.is_some();
        let summary = WerSummary {
            sentences: annotated.len(),
            filtered_out: records.len() - annotated.len(),
            mean_wer: plain_acc.mean(),
            total_wer: plain_acc.total(),
            mean_wer_cp: with_cp.then(|| cp_acc.mean()),
            total_wer_cp: with_cp.then(|| cp_acc.total()),
        };

        info!(
            "Evaluated {} sentences: mean WER {:.2}%, total WER {:.2}%",
            summary.sentences,
            summary.mean_wer * 100.0,
            summary.total_wer * 100.0
        );

        Ok(WerEvaluation {
            records: annotated,
            summary,
        })
    }

    fn check_fields(&self, records: &[Record]) -> Result<()> {
        let fields = self.options.required_fields();
        for (index, record) in records.iter().enumerate() {
            if let Some(missing) = fields.iter().find(|field| record.text(field).is_none()) {
                return Err(CorpusError::missing_field(index, *missing));
            }
        }
        Ok(())
    }
}
