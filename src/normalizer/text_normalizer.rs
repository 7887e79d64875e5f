use tracing::{debug, info};

use crate::error::{CorpusError, Result};
use crate::manifest::Record;
use crate::normalizer::{
    BlacklistStripper, CharacterFilter, DiacriticFolder, NormalizationReport, NormalizerConfig,
    RejectReason, RejectedItem, SentenceGate, TextStage,
};

/// Outcome of running one record through the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Kept,
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_kept(&self) -> bool {
        matches!(self, Verdict::Kept)
    }
}

/// Cleans one text field of manifest records.
///
/// Each record goes through the duration and acronym checks, then blacklist
/// stripping, diacritic folding and whitelist filtering, and finally the
/// empty-text check. Rejected records are dropped, never raised as errors.
/// Character inventories and rejection counters accumulate for the lifetime
/// of the instance.
pub struct TextNormalizer {
    config: NormalizerConfig,
    gate: SentenceGate,
    stages: Vec<Box<dyn TextStage>>,
    report: NormalizationReport,
}

impl TextNormalizer {
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        config.validate()?;

        let gate = SentenceGate::new(&config)?;
        let mut stages: Vec<Box<dyn TextStage>> = Vec::with_capacity(3);
        let blacklist = BlacklistStripper::new(&config.blacklist_terms)?;
        if !blacklist.is_empty() {
            stages.push(Box::new(blacklist));
        }
        stages.push(Box::new(DiacriticFolder::new(config.language)));
        stages.push(Box::new(CharacterFilter::new(config.keep_case_and_punctuation)));

        debug!(
            "Created {} normalizer for field '{}' (stages: {})",
            config.language,
            config.field,
            stages.iter().map(|s| s.name()).collect::<Vec<_>>().join(" -> ")
        );

        Ok(Self {
            config,
            gate,
            stages,
            report: NormalizationReport::default(),
        })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn report(&self) -> &NormalizationReport {
        &self.report
    }

    /// Normalize a batch and return the surviving records in input order.
    ///
    /// The configured field of every surviving record is replaced by its
    /// normalized value. Callers that need the original text must keep their
    /// own copy.
    pub fn normalize(&mut self, records: Vec<Record>) -> Result<Vec<Record>> {
        let mut kept = Vec::with_capacity(records.len());
        for (index, mut record) in records.into_iter().enumerate() {
            if self.normalize_record(index, &mut record)?.is_kept() {
                kept.push(record);
            }
        }

        self.log_report();
        Ok(kept)
    }

    /// Run a single record through the pipeline. `index` is its position in
    /// the batch, used in errors and rejection diagnostics.
    ///
    /// The field is only rewritten when the record passes the duration and
    /// acronym checks.
    pub fn normalize_record(&mut self, index: usize, record: &mut Record) -> Result<Verdict> {
        let field = self.config.field.clone();
        let raw = record
            .text(&field)
            .ok_or_else(|| CorpusError::missing_field(index, field.as_str()))?
            .to_string();
        self.report.processed += 1;

        if !self.gate.duration_ok(record.duration()) {
            return Ok(self.reject(index, record, RejectReason::Duration));
        }

        if self.gate.has_acronym(&raw) {
            return Ok(self.reject(index, record, RejectReason::Acronym));
        }

        self.report.chars_before.extend(raw.chars());

        let cleaned = self
            .stages
            .iter()
            .fold(raw, |text, stage| stage.apply(&text));

        self.report.chars_after.extend(cleaned.chars());
        let is_empty = self.gate.is_empty_text(&cleaned);
        record.set_text(&field, cleaned);

        if is_empty {
            return Ok(self.reject(index, record, RejectReason::EmptyText));
        }

        self.report.kept += 1;
        Ok(Verdict::Kept)
    }

    /// Emit the accumulated report.
    pub fn log_report(&self) {
        self.report.log(self.config.verbose, &self.config.field);
    }

    fn reject(&mut self, index: usize, record: &Record, reason: RejectReason) -> Verdict {
        let identifier = record
            .audio_filepath()
            .or_else(|| record.text(&self.config.field))
            .unwrap_or_default()
            .to_string();

        if self.config.verbose {
            info!("Removed ({}): {}", reason, identifier);
        } else {
            debug!("Removed ({}): {}", reason, identifier);
        }

        self.report.record_rejection(reason);
        if self.config.verbose_detail {
            self.report.rejected_items.push(RejectedItem {
                index,
                reason,
                identifier,
            });
        }

        Verdict::Rejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{AUDIO_FIELD, DURATION_FIELD, TEXT_FIELD};
    use crate::normalizer::Language;

    fn record(text: &str, duration: f64) -> Record {
        Record::from_text(text)
            .with(DURATION_FIELD, duration)
            .with(AUDIO_FIELD, format!("clips/{}.wav", text.len()))
    }

    #[test]
    fn test_normalize_spanish_sentence() {
        let mut normalizer = TextNormalizer::new(NormalizerConfig::default().quiet()).unwrap();
        let out = normalizer
            .normalize(vec![record("¿Qué pasó con Ægir?", 2.0)])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text(TEXT_FIELD), Some("qué pasó con aegir"));
    }

    #[test]
    fn test_rejections_are_counted_in_order() {
        let config = NormalizerConfig::for_language(Language::Basque)
            .with_remove_acronyms(true)
            .with_duration_bounds(1.0, 10.0)
            .with_verbose(false, true);
        let mut normalizer = TextNormalizer::new(config).unwrap();

        let records = vec![
            record("kaixo mundua", 2.0),
            record("EHU unibertsitatea", 20.0),
            record("EHU unibertsitatea", 2.0),
            record("1234 !!", 2.0),
            record("Gero arte", 3.0),
        ];
        let out = normalizer.normalize(records).unwrap();

        let texts: Vec<_> = out.iter().filter_map(|r| r.text(TEXT_FIELD)).collect();
        assert_eq!(texts, vec!["kaixo mundua", "gero arte"]);

        let report = normalizer.report();
        assert_eq!(report.processed, 5);
        assert_eq!(report.kept, 2);
        assert_eq!(report.rejected(RejectReason::Duration), 1);
        assert_eq!(report.rejected(RejectReason::Acronym), 1);
        assert_eq!(report.rejected(RejectReason::EmptyText), 1);
        let indices: Vec<_> = report.rejected_items.iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_rejected_entries_skip_inventory() {
        let config = NormalizerConfig::default().with_remove_acronyms(true).quiet();
        let mut normalizer = TextNormalizer::new(config).unwrap();
        normalizer
            .normalize(vec![Record::from_text("XYZ"), Record::from_text("abc")])
            .unwrap();

        let before = &normalizer.report().chars_before;
        assert!(before.contains(&'a'));
        assert!(!before.contains(&'X'));
    }

    #[test]
    fn test_inventory_accumulates_across_batches() {
        let mut normalizer = TextNormalizer::new(NormalizerConfig::default().quiet()).unwrap();
        normalizer.normalize(vec![Record::from_text("ab")]).unwrap();
        normalizer.normalize(vec![Record::from_text("Cd")]).unwrap();

        let report = normalizer.report();
        assert_eq!(report.processed, 2);
        assert_eq!(
            report.chars_after.iter().collect::<String>(),
            "abcd".to_string()
        );
        assert!(report.chars_before.contains(&'C'));
    }

    #[test]
    fn test_blacklist_applied_before_filtering() {
        let config = NormalizerConfig::default()
            .with_blacklist_terms([r"\(inint\)", r"\(Many speakers\)"])
            .quiet();
        let mut normalizer = TextNormalizer::new(config).unwrap();
        let out = normalizer
            .normalize(vec![Record::from_text(
                "(many speakers) hola (INint) qué tal",
            )])
            .unwrap();
        assert_eq!(out[0].text(TEXT_FIELD), Some("hola qué tal"));
    }

    #[test]
    fn test_only_configured_field_changes() {
        let config = NormalizerConfig::default().with_field("pred_text").quiet();
        let mut normalizer = TextNormalizer::new(config).unwrap();
        let input = Record::from_text("Hola, Mundo").with("pred_text", "Hola, Mundo");
        let out = normalizer.normalize(vec![input]).unwrap();

        assert_eq!(out[0].text("pred_text"), Some("hola mundo"));
        assert_eq!(out[0].text(TEXT_FIELD), Some("Hola, Mundo"));
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let mut normalizer = TextNormalizer::new(NormalizerConfig::default().quiet()).unwrap();
        let err = normalizer
            .normalize(vec![Record::from_text("hola"), Record::new().with("duration", 1.0)])
            .unwrap_err();
        assert!(matches!(err, CorpusError::MissingField { index: 1, .. }));
    }

    #[test]
    fn test_keep_empty_text_when_disabled() {
        let config = NormalizerConfig::default().with_remove_empty_text(false).quiet();
        let mut normalizer = TextNormalizer::new(config).unwrap();
        let out = normalizer.normalize(vec![Record::from_text("1234 !!")]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text(TEXT_FIELD), Some(""));
    }
}
