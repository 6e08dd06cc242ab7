//! Rule-based Welsh pronunciation: words to phones, syllables and stress,
//! plus a lexicon builder for speech-recognition dictionaries.

pub mod config;
pub mod error;
pub mod language;
pub mod lexicon;
pub mod types;

pub use error::{G2pError, LexiconError};
pub use language::{word_to_phones, word_to_stressed_phones, Exceptions, G2p};
pub use types::{Diagnostic, Phone, Syllable, UnstressedPhones};
