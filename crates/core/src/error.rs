//! Error types for conversion and data loading.

use thiserror::Error;

use crate::types::Phone;

/// The syllabifier ran out of vowels while phones remained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no vowel in syllable: phones={phones:?}, remaining={remaining:?}")]
pub struct NoVowelInSyllable {
    /// The full phone sequence being split
    pub phones: Vec<Phone>,
    /// What was left when no nucleus could be found
    pub remaining: Vec<Phone>,
}

/// A word could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum G2pError {
    #[error("no phones produced for {word:?}")]
    EmptyWord { word: String },

    #[error("cannot syllabify {word:?}")]
    NoVowelInSyllable {
        word: String,
        #[source]
        source: NoVowelInSyllable,
    },
}

impl G2pError {
    /// The word that failed.
    pub fn word(&self) -> &str {
        match self {
            G2pError::EmptyWord { word } | G2pError::NoVowelInSyllable { word, .. } => word,
        }
    }
}

/// Malformed pronunciation data.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
