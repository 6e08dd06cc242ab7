use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single phone symbol.
///
/// Consonants are lowercase (`"ll"`, `"wl"`), vowels are uppercase or `@`
/// (`"A"`, `"WY"`), and the stressed vowel carries a trailing `1`.
pub type Phone = String;

/// A group of phones forming one syllable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Syllable {
    pub onset: Vec<Phone>,
    /// Vowel core, never empty
    pub nucleus: Vec<Phone>,
    pub coda: Vec<Phone>,
    /// Last syllable of the word, or followed by an elided apostrophe
    pub is_final: bool,
}

impl Syllable {
    /// All phones of the syllable in order.
    pub fn phones(&self) -> impl Iterator<Item = &Phone> {
        self.onset.iter().chain(self.nucleus.iter()).chain(self.coda.iter())
    }

    pub fn len(&self) -> usize {
        self.onset.len() + self.nucleus.len() + self.coda.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compact form: `(onset nucleus coda)`, `.` for an empty part and a
    /// trailing `$` on final syllables.
    pub fn short(&self) -> String {
        let part = |p: &[Phone]| {
            if p.is_empty() {
                ".".to_string()
            } else {
                p.concat()
            }
        };
        format!(
            "({} {} {}{})",
            part(&self.onset),
            part(&self.nucleus),
            part(&self.coda),
            if self.is_final { "$" } else { "" }
        )
    }
}

/// Flatten syllables back into a phone sequence.
pub fn flatten(syllables: &[Syllable]) -> Vec<Phone> {
    syllables.iter().flat_map(|s| s.phones().cloned()).collect()
}

/// A grapheme the contextual rules could not classify.
///
/// Recorded for offline review of the rule tables; the grapheme itself
/// produces no phone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub word: String,
    /// Index in the apostrophe-free grapheme sequence
    pub position: usize,
    pub grapheme: String,
    /// Preceding grapheme, `^` at the start of the word
    pub previous: String,
    /// Following grapheme, `$` at the end of the word
    pub next: String,
}

/// Result of the unstressed (pre-syllabification) conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnstressedPhones {
    pub phones: Vec<Phone>,
    /// Phone positions before which an apostrophe was elided
    pub apostrophes: BTreeSet<usize>,
    pub diagnostics: Vec<Diagnostic>,
}
