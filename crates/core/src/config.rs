//! Phonemizer configuration: which data files to load on top of the
//! built-in rules.
//!
//! Read from a JSON file given explicitly, or named by `LLEF_CONFIG`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::language::Exceptions;
use crate::lexicon::{Phonemizer, PhoneMap, PronunciationDict};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "LLEF_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhonemizerConfig {
    /// Pronunciation dictionary, `WORD ph... /ipa/` per line
    pub dictionary: Option<PathBuf>,
    /// Tab-separated phone substitutions applied to rule output
    pub phone_map: Option<PathBuf>,
    /// Extra unstressed exceptions, `word: phones` per line
    pub exceptions: Option<PathBuf>,
}

impl PhonemizerConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config from `explicit` if given, else from `LLEF_CONFIG`, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::resolve_with(explicit, from_env.as_deref())
    }

    fn resolve_with(explicit: Option<&Path>, from_env: Option<&Path>) -> Result<Self> {
        match explicit.or(from_env) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Built-in exceptions, extended by the configured file if any.
    pub fn exceptions(&self) -> Result<Exceptions> {
        let builtin = Exceptions::builtin().clone();
        match &self.exceptions {
            Some(path) => builtin
                .with_unstressed_file(path)
                .with_context(|| format!("Failed to load exceptions: {}", path.display())),
            None => Ok(builtin),
        }
    }

    /// Load every configured data file into a ready phonemizer.
    pub fn phonemizer(&self) -> Result<Phonemizer> {
        let dictionary = match &self.dictionary {
            Some(path) => PronunciationDict::load(path)
                .with_context(|| format!("Failed to load dictionary: {}", path.display()))?,
            None => PronunciationDict::default(),
        };
        let phone_map = match &self.phone_map {
            Some(path) => PhoneMap::load(path)
                .with_context(|| format!("Failed to load phone map: {}", path.display()))?,
            None => PhoneMap::default(),
        };
        Ok(Phonemizer::new(dictionary, phone_map, self.exceptions()?))
    }
}
