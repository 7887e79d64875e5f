//! Manifest records and JSON-lines manifest files.
//!
//! A manifest is a file with one JSON object per line, each describing one
//! utterance: an audio reference, a transcript and usually a duration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{CorpusError, Result};

pub const AUDIO_FIELD: &str = "audio_filepath";
pub const DURATION_FIELD: &str = "duration";
pub const TEXT_FIELD: &str = "text";

/// One manifest entry. Field names are free-form; the pipeline only looks at
/// the fields it is configured for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record with a single `text` field.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().with(TEXT_FIELD, text.into())
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// String value of `field`, `None` when absent or not a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn set_text(&mut self, field: &str, text: String) {
        self.0.insert(field.to_string(), Value::String(text));
    }

    /// Duration in seconds. Accepts JSON numbers and numeric strings, which
    /// is what TSV-derived manifests tend to contain.
    pub fn duration(&self) -> Option<f64> {
        match self.0.get(DURATION_FIELD)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn audio_filepath(&self) -> Option<&str> {
        self.text(AUDIO_FIELD)
    }
}

/// Read a JSON-lines manifest. Blank lines are skipped.
pub fn read_manifest(path: &Path) -> Result<Vec<Record>> {
    info!("Reading manifest {:?}", path);
    let file = File::open(path).map_err(|e| CorpusError::io("opening manifest", path, e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CorpusError::io("reading manifest", path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(&line).map_err(|source| CorpusError::Json {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }

    debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Write records as a JSON-lines manifest, creating parent directories.
pub fn write_manifest(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| CorpusError::io("creating manifest directory", parent, e))?;
    }

    let file = File::create(path).map_err(|e| CorpusError::io("creating manifest", path, e))?;
    let mut writer = BufWriter::new(file);
    for (idx, record) in records.iter().enumerate() {
        serde_json::to_writer(&mut writer, record).map_err(|source| CorpusError::Json {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        writer
            .write_all(b"\n")
            .map_err(|e| CorpusError::io("writing manifest", path, e))?;
    }
    writer
        .flush()
        .map_err(|e| CorpusError::io("writing manifest", path, e))?;

    info!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}

/// Column names of a corpus TSV export.
#[derive(Debug, Clone, PartialEq)]
pub struct TsvColumns {
    pub audio: String,
    pub text: String,
    /// Duration column in seconds; `None` when the export has none
    pub duration: Option<String>,
}

impl Default for TsvColumns {
    fn default() -> Self {
        Self {
            audio: "file_name".to_string(),
            text: "transcription".to_string(),
            duration: Some(DURATION_FIELD.to_string()),
        }
    }
}

impl TsvColumns {
    pub fn new(audio: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            text: text.into(),
            duration: None,
        }
    }

    pub fn with_duration(mut self, column: impl Into<String>) -> Self {
        self.duration = Some(column.into());
        self
    }
}

/// Read a tab-separated corpus export into manifest records.
///
/// The first line is the header. Audio file names are prefixed with
/// `clips_folder` unless it is empty. Empty duration cells leave the record
/// without a duration.
pub fn read_tsv(path: &Path, clips_folder: &str, columns: &TsvColumns) -> Result<Vec<Record>> {
    info!("Reading TSV {:?}", path);
    let file = File::open(path).map_err(|e| CorpusError::io("opening TSV file", path, e))?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line.map_err(|e| CorpusError::io("reading TSV file", path, e))?,
        None => return Ok(Vec::new()),
    };
    let header: Vec<&str> = header.trim_end_matches('\r').split('\t').collect();
    let position = |column: &str| {
        header
            .iter()
            .position(|name| *name == column)
            .ok_or_else(|| CorpusError::tsv(path, 1, format!("no column named '{}'", column)))
    };
    let audio = position(columns.audio.as_str())?;
    let text = position(columns.text.as_str())?;
    let duration = match columns.duration.as_deref() {
        Some(column) => Some(position(column)?),
        None => None,
    };

    let folder = clips_folder.trim_end_matches('/');
    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_number = idx + 2;
        let line = line.map_err(|e| CorpusError::io("reading TSV file", path, e))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split('\t').collect();
        let cell = |column: usize| {
            cells.get(column).copied().ok_or_else(|| {
                CorpusError::tsv(
                    path,
                    line_number,
                    format!("expected at least {} columns, found {}", column + 1, cells.len()),
                )
            })
        };

        let audio_file = cell(audio)?;
        let audio_filepath = if folder.is_empty() {
            audio_file.to_string()
        } else {
            format!("{}/{}", folder, audio_file)
        };
        let mut record = Record::new()
            .with(AUDIO_FIELD, audio_filepath)
            .with(TEXT_FIELD, cell(text)?);

        if let Some(column) = duration {
            let raw = cell(column)?.trim();
            if !raw.is_empty() {
                let seconds = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|d| d.is_finite())
                    .ok_or_else(|| {
                        CorpusError::tsv(path, line_number, format!("invalid duration '{}'", raw))
                    })?;
                record.insert(DURATION_FIELD, seconds);
            }
        }
        records.push(record);
    }

    debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Read a plain text corpus, one `text` record per non-empty line.
pub fn read_text_lines(path: &Path) -> Result<Vec<Record>> {
    let content =
        std::fs::read_to_string(path).map_err(|e| CorpusError::io("reading text file", path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Record::from_text)
        .collect())
}
