//! Duration statistics for manifests.

use serde::Serialize;
use std::fmt;

use crate::manifest::Record;

/// Summary of the audio durations in a set of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    /// Records with a usable duration
    pub count: usize,
    /// Records without one
    pub skipped: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub total: f64,
}

impl DurationStats {
    /// `None` when no record carries a duration.
    pub fn from_records(records: &[Record]) -> Option<Self> {
        let mut durations: Vec<f64> = records
            .iter()
            .filter_map(Record::duration)
            .filter(|d| d.is_finite())
            .collect();
        if durations.is_empty() {
            return None;
        }
        durations.sort_by(f64::total_cmp);

        let count = durations.len();
        let total: f64 = durations.iter().sum();
        let median = if count % 2 == 1 {
            durations[count / 2]
        } else {
            (durations[count / 2 - 1] + durations[count / 2]) / 2.0
        };

        Some(Self {
            count,
            skipped: records.len() - count,
            min: durations[0],
            max: durations[count - 1],
            mean: total / count as f64,
            median,
            total,
        })
    }

    pub fn total_hours(&self) -> f64 {
        self.total / 3600.0
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tMin time:    {:.2} s", self.min)?;
        writeln!(f, "\tMean time:   {:.2} s", self.mean)?;
        writeln!(f, "\tMedian time: {:.2} s", self.median)?;
        writeln!(f, "\tMax time:    {:.2} s", self.max)?;
        writeln!(
            f,
            "\n\tTotal time:  {:.2} s | {:.2} h",
            self.total,
            self.total_hours()
        )?;
        write!(f, "\tSentences:   {}", self.count)?;
        if self.skipped > 0 {
            write!(f, " ({} without duration)", self.skipped)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::DURATION_FIELD;

    fn with_duration(duration: f64) -> Record {
        Record::from_text("x").with(DURATION_FIELD, duration)
    }

    #[test]
    fn test_stats_odd_count() {
        let records = vec![with_duration(3.0), with_duration(1.0), with_duration(2.0)];
        let stats = DurationStats::from_records(&records).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 2.0);
        assert_eq!(stats.total, 6.0);
    }

    #[test]
    fn test_stats_even_count_and_skipped() {
        let records = vec![
            with_duration(1.0),
            with_duration(4.0),
            Record::from_text("no duration"),
            with_duration(2.0),
            with_duration(3600.0),
        ];
        let stats = DurationStats::from_records(&records).unwrap();

        assert_eq!(stats.count, 4);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.median, 3.0);
        assert!((stats.total_hours() - 3607.0 / 3600.0).abs() < 1e-12);
    }

    #[test]
    fn test_stats_without_durations() {
        assert!(DurationStats::from_records(&[Record::from_text("a")]).is_none());
        assert!(DurationStats::from_records(&[]).is_none());
    }
}
