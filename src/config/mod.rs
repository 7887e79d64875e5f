use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{CorpusError, Result};
use crate::global;
use crate::normalizer::NormalizerConfig;
use crate::wer::WerOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalizer: NormalizerConfig,
    pub evaluation: WerOptions,
}

impl Config {
    /// Load the config from the default location, falling back to defaults
    /// when no file exists there.
    pub fn load() -> Result<Self> {
        match global::config_file() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                info!("Config file not found at {:?}, using defaults", path);
                Ok(Self::default())
            }
            None => {
                info!("Unable to determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CorpusError::io("reading config file", path, e))?;

        let config: Self = toml::from_str(&content).map_err(|e| CorpusError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.normalizer.validate()?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Write the config to `path`, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => global::config_file()
                .ok_or_else(|| CorpusError::invalid_config("unable to determine config directory"))?,
        };

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| CorpusError::io("creating config directory", parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(&config_path, content)
            .map_err(|e| CorpusError::io("writing config file", &config_path, e))?;

        Ok(config_path)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CorpusError::invalid_config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::Language;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [normalizer]
            language = "eu"
            blacklist_terms = ['\(inint\)']

            [evaluation]
            case_and_punctuation = true
            "#,
        )
        .unwrap();

        assert_eq!(config.normalizer.language, Language::Basque);
        assert_eq!(config.normalizer.blacklist_terms.len(), 1);
        assert!(config.normalizer.remove_empty_text);
        assert!(config.evaluation.case_and_punctuation);
        assert_eq!(config.evaluation.hypothesis_field, "pred_text");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.normalizer.remove_acronyms = true;
        config.evaluation.reference_cp_field = Some("text_cp".to_string());

        let written = config.save(Some(&path)).unwrap();
        assert_eq!(written, path);
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_language_in_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[normalizer]\nlanguage = \"fr\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CorpusError::Config { .. }));
        assert!(err.to_string().contains("fr"));
    }
}
