//! Grapheme-to-phoneme conversion for Welsh.
//!
//! Rule-based: words are tokenized into graphemes, the ambiguous letters
//! `i` and `w` are read from context, diphthongs are merged, and the phones
//! are split into syllables that then receive vowel reduction and stress.
//! Irregular words are taken from the exception tables instead.

use std::collections::BTreeSet;

use crate::error::G2pError;
use crate::types::{flatten, Diagnostic, Phone, Syllable, UnstressedPhones};

use super::context::{classify_i, classify_w, Cluster, Context, Decision, Reading};
use super::diphthongs;
use super::exceptions::Exceptions;
use super::graphemes::{is_consonant, is_plain_vowel, normalise, tokenize};
use super::stress::{assign_stress, reduce_vowels, strip_accents};
use super::syllabify::split_syllables;

/// The conversion engine. Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct G2p<'t> {
    exceptions: &'t Exceptions,
}

impl Default for G2p<'static> {
    fn default() -> Self {
        Self::new(Exceptions::builtin())
    }
}

impl<'t> G2p<'t> {
    pub fn new(exceptions: &'t Exceptions) -> Self {
        Self { exceptions }
    }

    /// Phones before syllabification, with apostrophe positions.
    ///
    /// Unstressed exceptions are returned as listed, without apostrophes.
    pub fn unstressed_phones(&self, word: &str) -> Result<UnstressedPhones, G2pError> {
        let key = normalise(word);
        if let Some(phones) = self.exceptions.unstressed(&key) {
            log::debug!("Unstressed exception: {}", key);
            return Ok(UnstressedPhones {
                phones: phones.to_vec(),
                ..Default::default()
            });
        }

        let converted = rule_phones(&key);
        if converted.phones.is_empty() {
            return Err(G2pError::EmptyWord { word: key });
        }
        Ok(converted)
    }

    /// Syllables with reduction, stress and accent removal applied.
    pub fn syllables(&self, word: &str) -> Result<Vec<Syllable>, G2pError> {
        let unstressed = self.unstressed_phones(word)?;
        let syllables = split_syllables(&unstressed.phones, &unstressed.apostrophes).map_err(
            |source| G2pError::NoVowelInSyllable {
                word: normalise(word),
                source,
            },
        )?;
        Ok(strip_accents(assign_stress(reduce_vowels(syllables))))
    }

    /// Stressed phones; stressed exceptions bypass syllabification.
    pub fn stressed_phones(&self, word: &str) -> Result<Vec<Phone>, G2pError> {
        let key = normalise(word);
        if let Some(phones) = self.exceptions.stressed(&key) {
            log::debug!("Stressed exception: {}", key);
            return Ok(phones.to_vec());
        }
        Ok(flatten(&self.syllables(&key)?))
    }
}

/// Unstressed phones of a word using the built-in exception tables.
pub fn word_to_phones(word: &str) -> Result<Vec<Phone>, G2pError> {
    G2p::default().unstressed_phones(word).map(|u| u.phones)
}

/// Stressed phones of a word using the built-in exception tables.
pub fn word_to_stressed_phones(word: &str) -> Result<Vec<Phone>, G2pError> {
    G2p::default().stressed_phones(word)
}

/// Apply the grapheme rules to a normalised word, skipping exceptions.
pub fn rule_phones(word: &str) -> UnstressedPhones {
    let graphemes = tokenize(word);
    let units = &graphemes.units;
    let mut phones: Vec<Phone> = Vec::with_capacity(units.len());
    let mut apostrophes = BTreeSet::new();
    let mut diagnostics = Vec::new();
    let mut absorbed = false;

    for (i, unit) in units.iter().enumerate() {
        if graphemes.apostrophes.contains(&i) {
            apostrophes.insert(phones.len());
        }
        if absorbed {
            absorbed = false;
            continue;
        }

        match unit.as_str() {
            "ph" => phones.push("ff".to_string()),
            u if is_consonant(u) => phones.push(u.to_string()),
            u if is_plain_vowel(u) || u == "y" => phones.push(u.to_uppercase()),
            "i" | "w" => {
                let ctx = Context::new(units, i, &phones, &graphemes.apostrophes);
                let letter = ctx.current().to_string();
                let decision = if letter == "i" {
                    classify_i(&ctx)
                } else {
                    classify_w(&ctx)
                };
                match decision.reading {
                    Reading::Unclassified => {
                        let diagnostic = Diagnostic {
                            word: word.to_string(),
                            position: i,
                            grapheme: letter,
                            previous: ctx.previous().to_string(),
                            next: ctx.next().to_string(),
                        };
                        log::warn!(
                            "Unclassified {:?} at {} in {:?} ({} _ {})",
                            diagnostic.grapheme,
                            i,
                            word,
                            diagnostic.previous,
                            diagnostic.next
                        );
                        diagnostics.push(diagnostic);
                    }
                    _ => absorbed = apply(&mut phones, &letter, decision),
                }
            }
            other => log::debug!("No rule for grapheme {:?} in {:?}", other, word),
        }
    }
    if graphemes.apostrophes.contains(&units.len()) {
        apostrophes.insert(phones.len());
    }

    let (phones, apostrophes) = diphthongs::merge(&phones, &apostrophes);
    UnstressedPhones {
        phones,
        apostrophes,
        diagnostics,
    }
}

/// Emit the phone for a decided `i` or `w`. Returns true when the next
/// grapheme was absorbed into a cluster.
fn apply(phones: &mut Vec<Phone>, letter: &str, decision: Decision) -> bool {
    match decision.reading {
        Reading::Vowel => phones.push(letter.to_uppercase()),
        Reading::Consonant => phones.push(letter.to_string()),
        Reading::Cluster(cluster) => {
            if cluster == Cluster::Sh && phones.last().is_some_and(|p| p == "s") {
                phones.pop();
            }
            phones.push(cluster.phone().to_string());
            return cluster.absorbs_next();
        }
        Reading::Unclassified => {}
    }
    false
}
