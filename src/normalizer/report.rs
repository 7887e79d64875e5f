use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::normalizer::RejectReason;

/// An entry that was filtered out, kept for detailed reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedItem {
    /// Position of the entry in the batch it came from
    pub index: usize,
    pub reason: RejectReason,
    /// Audio reference when the entry has one, otherwise its text
    pub identifier: String,
}

/// Diagnostics accumulated by one normalizer over every batch it processes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizationReport {
    pub processed: usize,
    pub kept: usize,
    pub rejections: BTreeMap<RejectReason, usize>,
    /// Characters seen before folding and filtering
    pub chars_before: BTreeSet<char>,
    /// Characters left after folding and filtering
    pub chars_after: BTreeSet<char>,
    /// Only filled in when detailed verbosity is on
    pub rejected_items: Vec<RejectedItem>,
}

impl NormalizationReport {
    pub fn rejected(&self, reason: RejectReason) -> usize {
        self.rejections.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_rejected(&self) -> usize {
        self.rejections.values().sum()
    }

    /// Share of processed entries rejected, in percent.
    pub fn percent(&self, count: usize) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            count as f64 / self.processed as f64 * 100.0
        }
    }

    pub(crate) fn record_rejection(&mut self, reason: RejectReason) {
        *self.rejections.entry(reason).or_insert(0) += 1;
    }

    /// Log the report, at info level when `verbose` and debug otherwise.
    pub fn log(&self, verbose: bool, field: &str) {
        let lines = self.summary_lines(field);
        for line in &lines {
            if verbose {
                info!("{}", line);
            } else {
                debug!("{}", line);
            }
        }
    }

    fn summary_lines(&self, field: &str) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Character list before cleaning ({}): size = {} {:?}",
                field,
                self.chars_before.len(),
                self.chars_before
            ),
            format!(
                "Character list after cleaning ({}): size = {} {:?}",
                field,
                self.chars_after.len(),
                self.chars_after
            ),
        ];

        for (reason, count) in &self.rejections {
            lines.push(format!(
                "Sentences removed ({}): {}/{} ({:.2}%)",
                reason,
                count,
                self.processed,
                self.percent(*count)
            ));
        }

        let total = self.total_rejected();
        lines.push(format!(
            "Total sentences removed: {}/{} ({:.2}%)",
            total,
            self.processed,
            self.percent(total)
        ));

        for item in &self.rejected_items {
            lines.push(format!(
                "Removed #{} ({}): {}",
                item.index, item.reason, item.identifier
            ));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_percentages() {
        let mut report = NormalizationReport {
            processed: 8,
            ..Default::default()
        };
        report.record_rejection(RejectReason::Acronym);
        report.record_rejection(RejectReason::Acronym);
        report.record_rejection(RejectReason::EmptyText);

        assert_eq!(report.rejected(RejectReason::Acronym), 2);
        assert_eq!(report.rejected(RejectReason::Duration), 0);
        assert_eq!(report.total_rejected(), 3);
        assert_eq!(report.percent(2), 25.0);
    }

    #[test]
    fn test_percent_of_empty_report() {
        let report = NormalizationReport::default();
        assert_eq!(report.percent(0), 0.0);
    }

    #[test]
    fn test_summary_mentions_rejected_items() {
        let mut report = NormalizationReport {
            processed: 1,
            ..Default::default()
        };
        report.record_rejection(RejectReason::Duration);
        report.rejected_items.push(RejectedItem {
            index: 0,
            reason: RejectReason::Duration,
            identifier: "clips/a.wav".to_string(),
        });

        let lines = report.summary_lines("text");
        assert!(lines.iter().any(|l| l.contains("clips/a.wav")));
        assert!(lines.iter().any(|l| l.contains("Total sentences removed: 1/1")));
    }
}
