//! Pronunciation lexicons for speech recognition.
//!
//! A [`Phonemizer`] prefers hand-checked pronunciations from a dictionary
//! and falls back to the rules, mapping rule phones onto the dictionary's
//! phone set. [`build_lexicon`] runs it over a word list.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LexiconError;
use crate::language::graphemes::normalise;
use crate::language::{Exceptions, G2p};
use crate::types::Phone;

fn read_file(path: &Path) -> Result<String, LexiconError> {
    std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.display().to_string(),
        source,
    })
}

// --- Dictionary ---

/// Word → pronunciation variants, in file order.
#[derive(Debug, Clone, Default)]
pub struct PronunciationDict {
    entries: HashMap<String, Vec<Vec<Phone>>>,
}

impl PronunciationDict {
    /// Parse `WORD PH1 PH2 ... /IPA/` lines.
    ///
    /// Stress (`'`) and boundary (`-`) markers are removed from the phones.
    /// Repeated words add variants.
    pub fn parse(text: &str) -> Result<Self, LexiconError> {
        let mut entries: HashMap<String, Vec<Vec<Phone>>> = HashMap::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (word, phones) = split_dict_line(line).ok_or_else(|| LexiconError::Parse {
                line: n + 1,
                message: format!("expected 'WORD phones /ipa/', got {:?}", line),
            })?;
            let phones: Vec<Phone> = phones
                .replace(['\'', '-'], "")
                .split_whitespace()
                .map(String::from)
                .collect();
            entries.entry(normalise(word)).or_default().push(phones);
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let dict = Self::parse(&read_file(path)?)?;
        log::info!("Loaded {} dictionary words from {}", dict.len(), path.display());
        Ok(dict)
    }

    pub fn lookup(&self, word: &str) -> Option<&[Vec<Phone>]> {
        self.entries.get(&normalise(word)).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a dictionary line into (word, phones), dropping the IPA.
///
/// The IPA is the last ` /.../` run closing the line.
fn split_dict_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end();
    let (word, rest) = line.split_once(' ')?;
    if word.is_empty() || !rest.ends_with('/') {
        return None;
    }
    let (phones, _ipa) = rest
        .rmatch_indices(" /")
        .map(|(i, _)| (&rest[..i], &rest[i + 1..]))
        .find(|(phones, ipa)| !phones.is_empty() && ipa.len() >= 2)?;
    Some((word, phones))
}

// --- Phone map ---

/// Substitutions from rule phones to dictionary phones.
#[derive(Debug, Clone, Default)]
pub struct PhoneMap {
    map: HashMap<String, String>,
}

impl PhoneMap {
    /// Parse `phone<TAB>replacement` rows. A header row starting with
    /// `Phone` is skipped and extra columns are ignored. An empty
    /// replacement deletes the phone.
    pub fn parse(text: &str) -> Result<Self, LexiconError> {
        let mut map = HashMap::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() || (n == 0 && line.starts_with("Phone")) {
                continue;
            }
            let mut cols = line.split('\t');
            let phone = cols.next().map(str::trim).unwrap_or_default();
            let replacement = cols.next().ok_or_else(|| LexiconError::Parse {
                line: n + 1,
                message: format!("expected 'phone<TAB>replacement', got {:?}", line),
            })?;
            if phone.is_empty() {
                return Err(LexiconError::Parse {
                    line: n + 1,
                    message: "empty phone".to_string(),
                });
            }
            map.insert(phone.to_string(), replacement.trim().to_string());
        }
        Ok(Self { map })
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let map = Self::parse(&read_file(path)?)?;
        log::info!("Loaded {} phone mappings from {}", map.map.len(), path.display());
        Ok(map)
    }

    /// Replace mapped phones, keep the rest.
    pub fn apply(&self, phones: &[Phone]) -> Vec<Phone> {
        phones
            .iter()
            .map(|p| self.map.get(p).unwrap_or(p).clone())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

// --- Phonemizer ---

/// Dictionary lookup with a rule-based fallback.
#[derive(Debug, Clone)]
pub struct Phonemizer {
    dictionary: PronunciationDict,
    phone_map: PhoneMap,
    exceptions: Exceptions,
}

impl Default for Phonemizer {
    fn default() -> Self {
        Self::new(
            PronunciationDict::default(),
            PhoneMap::default(),
            Exceptions::builtin().clone(),
        )
    }
}

impl Phonemizer {
    pub fn new(dictionary: PronunciationDict, phone_map: PhoneMap, exceptions: Exceptions) -> Self {
        Self {
            dictionary,
            phone_map,
            exceptions,
        }
    }

    /// All pronunciations of `word`; empty when it cannot be converted.
    pub fn phonemize(&self, word: &str) -> Vec<Vec<Phone>> {
        if let Some(variants) = self.dictionary.lookup(word) {
            return variants.to_vec();
        }
        match G2p::new(&self.exceptions).unstressed_phones(word) {
            Ok(unstressed) => vec![self.phone_map.apply(&unstressed.phones)],
            Err(e) => {
                log::debug!("{}", e);
                Vec::new()
            }
        }
    }
}

// --- Lexicon ---

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub phones: Vec<Phone>,
}

/// Sorted, deduplicated word/pronunciation pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    pub entries: Vec<LexiconEntry>,
    /// Words with no usable pronunciation
    pub failed: Vec<String>,
}

impl Lexicon {
    /// Every phone used by the entries.
    pub fn phone_set(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(|e| e.phones.iter().map(|p| p.as_str()))
            .collect()
    }
}

impl fmt::Display for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{} {}", entry.word, entry.phones.join(" "))?;
        }
        Ok(())
    }
}

/// Phonemize each distinct word once and collect the pronunciations.
///
/// Entries are sorted by word, then by space-joined phones.
pub fn build_lexicon<I, S>(phonemizer: &Phonemizer, words: I) -> Lexicon
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let distinct: BTreeSet<String> = words.into_iter().map(|w| w.as_ref().to_string()).collect();
    let mut pairs: BTreeSet<(String, String, Vec<Phone>)> = BTreeSet::new();
    let mut failed = Vec::new();

    for word in distinct {
        let pronunciations: Vec<Vec<Phone>> = phonemizer
            .phonemize(&word)
            .into_iter()
            .map(|pron| pron.into_iter().filter(|p| !p.is_empty()).collect::<Vec<_>>())
            .filter(|pron| !pron.is_empty())
            .collect();
        if pronunciations.is_empty() {
            log::warn!("Failed to phonemize {:?}", word);
            failed.push(word);
            continue;
        }
        for phones in pronunciations {
            pairs.insert((word.clone(), phones.join(" "), phones));
        }
    }

    Lexicon {
        entries: pairs
            .into_iter()
            .map(|(word, _, phones)| LexiconEntry { word, phones })
            .collect(),
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn p(s: &str) -> Vec<Phone> {
        s.split_whitespace().map(String::from).collect()
    }

    const DICT: &str = "\
cymru k @ m r I /ˈkəmrɪ/
ysgol @ s - g O l /ˈəsɡɔl/
ysgol @ s g o l /ˈəsɡol/
a'r a r /ar/
";

    #[test]
    fn test_dict_parse_variants() {
        let dict = PronunciationDict::parse(DICT).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.lookup("cymru"), Some(&[p("k @ m r I")][..]));
        assert_eq!(dict.lookup("ysgol").unwrap(), &[p("@ s g O l"), p("@ s g o l")]);
        assert!(dict.lookup("tŷ").is_none());
    }

    #[test]
    fn test_dict_strips_stress_markers() {
        let dict = PronunciationDict::parse("gwlad g w l 'a: d /ɡwlaːd/\n").unwrap();
        assert_eq!(dict.lookup("gwlad").unwrap()[0], p("g w l a: d"));
    }

    #[test]
    fn test_dict_lookup_normalises() {
        let dict = PronunciationDict::parse(DICT).unwrap();
        assert!(dict.lookup("Cymru").is_some());
        assert!(dict.lookup("a’r").is_some());
    }

    #[test]
    fn test_dict_bad_line() {
        let err = PronunciationDict::parse("cymru k @ m r I /ˈkəmrɪ/\ncymraeg k @ m r ai g\n")
            .unwrap_err();
        match err {
            LexiconError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_split_dict_line() {
        assert_eq!(split_dict_line("ci k i: /kiː/"), Some(("ci", "k i:")));
        // a slash inside the IPA does not end the phones early
        assert_eq!(split_dict_line("ci k i: /ki/ /kiː/"), Some(("ci", "k i: /ki/")));
        assert_eq!(split_dict_line("ci /kiː/"), None);
        assert_eq!(split_dict_line("ci k i:"), None);
    }

    #[test]
    fn test_phone_map() {
        let map = PhoneMap::parse("Phone\tGeiriadur\tNotes\nY\ty\tcentral\nAE\tai\n@W\t\n").unwrap();
        assert_eq!(map.apply(&p("c Y m r AE g")), p("c y m r ai g"));
        // empty replacement deletes
        assert_eq!(map.apply(&p("t @W Y")), p("t y"));
    }

    #[test]
    fn test_phone_map_missing_column() {
        assert!(PhoneMap::parse("Y y\n").is_err());
    }

    #[test]
    fn test_phonemizer_prefers_dictionary() {
        let dict = PronunciationDict::parse(DICT).unwrap();
        let phonemizer = Phonemizer::new(dict, PhoneMap::default(), Exceptions::default());
        assert_eq!(phonemizer.phonemize("ysgol").len(), 2);
        assert_eq!(phonemizer.phonemize("gwlad"), vec![p("g wl A d")]);
    }

    #[test]
    fn test_phonemizer_failure_is_empty() {
        let phonemizer = Phonemizer::default();
        assert!(phonemizer.phonemize("").is_empty());
        // unstressed conversion does not syllabify, so bcd still yields phones
        assert_eq!(phonemizer.phonemize("bcd"), vec![p("b c d")]);
    }

    #[test]
    fn test_build_lexicon_sorted_and_deduplicated() {
        let dict = PronunciationDict::parse(DICT).unwrap();
        let phonemizer = Phonemizer::new(dict, PhoneMap::default(), Exceptions::default());
        let lexicon = build_lexicon(&phonemizer, ["ysgol", "gwyn", "ysgol", "cymru", "'"]);

        let lines = lexicon.to_string();
        assert_eq!(
            lines,
            "cymru k @ m r I\ngwyn g w Y n\nysgol @ s g O l\nysgol @ s g o l\n"
        );
        assert_eq!(lexicon.failed, vec!["'".to_string()]);
    }

    #[test]
    fn test_build_lexicon_collapses_identical_variants() {
        let dict = PronunciationDict::parse("ci k i: /kiː/\nci k i: /ki/\n").unwrap();
        let phonemizer = Phonemizer::new(dict, PhoneMap::default(), Exceptions::default());
        let lexicon = build_lexicon(&phonemizer, ["ci"]);
        assert_eq!(lexicon.entries.len(), 1);
    }

    #[test]
    fn test_phone_set() {
        let lexicon = build_lexicon(&Phonemizer::default(), ["gwlad", "dyn"]);
        let phones: Vec<&str> = lexicon.phone_set().into_iter().collect();
        assert_eq!(phones, vec!["A", "Y", "d", "g", "n", "wl"]);
    }

    #[test]
    fn test_load_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", DICT).unwrap();
        let dict = PronunciationDict::load(file.path()).unwrap();
        assert_eq!(dict.len(), 3);

        assert!(matches!(
            PhoneMap::load(Path::new("/nonexistent/map.tsv")),
            Err(LexiconError::Io { .. })
        ));
    }
}
