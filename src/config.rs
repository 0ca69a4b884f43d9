//! Configuration for the `wordtrie` command-line tool.
//!
//! Settings come from a TOML file. Every field has a default, so a missing
//! file or a missing section is not an error.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "WORDTRIE_CONFIG";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct WordtrieConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub predict: PredictConfig,
}

impl WordtrieConfig {
    /// Load from `path`, or from the resolved default location when `path`
    /// is `None`. A default location that does not exist yields defaults; an
    /// explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let config_path = resolve_config_path();
                if config_path.exists() {
                    Self::from_file(&config_path)
                } else {
                    Ok(WordtrieConfig::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let parsed: WordtrieConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML from {}", path.display()))?;
        Ok(parsed)
    }
}

fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    if let Some(base) = dirs::config_dir() {
        return base.join("wordtrie").join("config.toml");
    }

    PathBuf::from("wordtrie.toml")
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CorpusConfig {
    /// `word,count` CSV
    #[serde(default = "default_frequency_path")]
    pub frequency_path: PathBuf,
    /// Optional word list used to filter the frequency list
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,
    /// Lowercase and NFC-normalize corpus words and queries
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            frequency_path: default_frequency_path(),
            dictionary_path: None,
            normalize: default_normalize(),
        }
    }
}

fn default_frequency_path() -> PathBuf {
    PathBuf::from("unigram_freq.csv")
}

fn default_normalize() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PredictConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WordtrieConfig::default();
        assert_eq!(config.predict.top_n, 2);
        assert_eq!(config.corpus.frequency_path, PathBuf::from("unigram_freq.csv"));
        assert_eq!(config.corpus.dictionary_path, None);
        assert!(config.corpus.normalize);
    }

    #[test]
    fn test_normalize_off() {
        let parsed: WordtrieConfig = toml::from_str("[corpus]\nnormalize = false\n").unwrap();
        assert!(!parsed.corpus.normalize);
        assert_eq!(parsed.corpus.frequency_path, PathBuf::from("unigram_freq.csv"));
    }

    #[test]
    fn test_partial_file() {
        let parsed: WordtrieConfig = toml::from_str("[predict]\ntop_n = 3\n").unwrap();
        assert_eq!(parsed.predict.top_n, 3);
        assert_eq!(parsed.corpus, CorpusConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[corpus]\nfrequency_path = \"freq.csv\"\ndictionary_path = \"words.txt\""
        )
        .unwrap();

        let config = WordtrieConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.corpus.frequency_path, PathBuf::from("freq.csv"));
        assert_eq!(config.corpus.dictionary_path, Some(PathBuf::from("words.txt")));
        assert_eq!(config.predict.top_n, 2);
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = WordtrieConfig::load(Some(Path::new("/nonexistent/wordtrie.toml")));
        assert!(result.is_err());
    }
}
