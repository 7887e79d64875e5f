//! Manifest reading/writing around the normalizer.

use std::io::Write;

use speech_manifest::manifest::{
    read_manifest, read_text_lines, read_tsv, write_manifest, TsvColumns, AUDIO_FIELD, TEXT_FIELD,
};
use speech_manifest::stats::DurationStats;
use speech_manifest::wer::{AnnotationSummary, WER_CP_FIELD, WER_FIELD};
use speech_manifest::{CorpusError, ErrorKind, Language, NormalizerConfig, TextNormalizer};
use tempfile::{tempdir, NamedTempFile};

#[test]
fn test_normalize_manifest_file() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(
        input,
        r#"{{"audio_filepath": "clips/a.wav", "text": "Kaixo, Mundua!", "duration": 2.5}}"#
    )
    .unwrap();
    writeln!(input).unwrap();
    writeln!(
        input,
        r#"{{"audio_filepath": "clips/b.wav", "text": "1234", "duration": 1.0}}"#
    )
    .unwrap();
    writeln!(
        input,
        r#"{{"audio_filepath": "clips/c.wav", "text": "Agur", "duration": 999.0}}"#
    )
    .unwrap();

    let records = read_manifest(input.path()).unwrap();
    assert_eq!(records.len(), 3);

    let config = NormalizerConfig::for_language(Language::Basque).quiet();
    let mut normalizer = TextNormalizer::new(config).unwrap();
    let clean = normalizer.normalize(records).unwrap();

    let dir = tempdir().unwrap();
    let output = dir.path().join("processed").join("clean.json");
    write_manifest(&output, &clean).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "{\"audio_filepath\":\"clips/a.wav\",\"text\":\"kaixo mundua\",\"duration\":2.5}\n"
    );

    let stats = DurationStats::from_records(&read_manifest(&output).unwrap()).unwrap();
    assert_eq!(stats.count, 1);
    assert_eq!(stats.total, 2.5);
}

#[test]
fn test_non_ascii_written_unescaped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("es.json");
    let records = vec![speech_manifest::Record::from_text("año pingüino")];
    write_manifest(&path, &records).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("año pingüino"));
}

#[test]
fn test_malformed_line_reports_line_number() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, r#"{{"text": "ok"}}"#).unwrap();
    writeln!(input, "{{not json").unwrap();

    let err = read_manifest(input.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(matches!(err, CorpusError::Json { line: 2, .. }));
}

#[test]
fn test_missing_manifest_is_io_error() {
    let err = read_manifest(std::path::Path::new("/nonexistent/manifest.json")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_read_text_lines() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "  lehen esaldia ").unwrap();
    writeln!(input).unwrap();
    writeln!(input, "bigarren esaldia").unwrap();

    let records = read_text_lines(input.path()).unwrap();
    let texts: Vec<_> = records.iter().filter_map(|r| r.text(TEXT_FIELD)).collect();
    assert_eq!(texts, vec!["lehen esaldia", "bigarren esaldia"]);
}

#[test]
fn test_read_tsv_export() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "client_id\tfile_name\ttranscription\tduration").unwrap();
    writeln!(input, "c1\tcommon_voice_eu_1.mp3\tKaixo, Mundua!\t2.5").unwrap();
    writeln!(input, "c2\tcommon_voice_eu_2.mp3\tAgur\t").unwrap();

    let records = read_tsv(input.path(), "clips/", &TsvColumns::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].audio_filepath(),
        Some("clips/common_voice_eu_1.mp3")
    );
    assert_eq!(records[0].text(TEXT_FIELD), Some("Kaixo, Mundua!"));
    assert_eq!(records[0].duration(), Some(2.5));
    assert_eq!(records[1].duration(), None);

    let line = serde_json::to_string(&records[0]).unwrap();
    assert!(line.starts_with(&format!("{{\"{}\"", AUDIO_FIELD)));
}

#[test]
fn test_read_tsv_custom_columns_without_prefix() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "path\tsentence\tup_votes").unwrap();
    writeln!(input, "a.mp3\tHola\t2").unwrap();

    let columns = TsvColumns::new("path", "sentence");
    let records = read_tsv(input.path(), "", &columns).unwrap();
    assert_eq!(records[0].audio_filepath(), Some("a.mp3"));
    assert_eq!(records[0].text(TEXT_FIELD), Some("Hola"));
    assert_eq!(records[0].duration(), None);
}

#[test]
fn test_read_tsv_errors_name_the_line() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "file_name\ttranscription\tduration").unwrap();
    writeln!(input, "a.mp3\tbat\t1.0").unwrap();
    writeln!(input, "b.mp3\tbi\tlong").unwrap();

    let err = read_tsv(input.path(), "", &TsvColumns::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(matches!(err, CorpusError::Tsv { line: 3, .. }));

    let columns = TsvColumns::new("file_name", "sentence");
    let err = read_tsv(input.path(), "", &columns).unwrap_err();
    assert!(matches!(err, CorpusError::Tsv { line: 1, .. }));
}

#[test]
fn test_summarize_annotated_manifest() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, r#"{{"text": "a", "wer": 0.5, "wer_cp": 1.0}}"#).unwrap();
    writeln!(input, r#"{{"text": "b", "wer": 0.0, "wer_cp": 0.5}}"#).unwrap();

    let summary = AnnotationSummary::from_records(&read_manifest(input.path()).unwrap()).unwrap();
    assert_eq!(summary.sentences, 2);
    assert_eq!(summary.mean_wer, 0.25);
    assert_eq!(summary.mean_wer_cp, Some(0.75));
}

#[test]
fn test_summarize_requires_scores_on_every_record() {
    let records = vec![
        speech_manifest::Record::from_text("a").with(WER_FIELD, 0.5).with(WER_CP_FIELD, 0.5),
        speech_manifest::Record::from_text("b").with(WER_FIELD, 0.0),
    ];
    let err = AnnotationSummary::from_records(&records).unwrap_err();
    assert!(matches!(err, CorpusError::MissingField { index: 1, .. }));

    let err = AnnotationSummary::from_records(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
}
