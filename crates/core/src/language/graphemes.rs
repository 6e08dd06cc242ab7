//! Grapheme tokenizer: splits a word into Welsh orthographic units.
//!
//! Multi-letter consonants (`ngh`, `ll`, `dd`, ...) are matched longest
//! first, every vowel letter is its own unit, and apostrophes are removed
//! while their positions are remembered.

use std::collections::BTreeSet;

/// Three-letter consonants, tried first.
const TRIGRAPHS: &[&str] = &["ngh", "tsh"];

/// Two-letter consonants.
const DIGRAPHS: &[&str] = &[
    "ch", "dd", "ff", "mh", "nh", "ng", "ll", "ph", "rh", "th", "ts", "sh",
];

/// Single-letter consonants.
const CONSONANT_LETTERS: &str = "bcdfghjlmnprst";

/// Vowel letters that are always vowels, with every diacritic form.
const PLAIN_VOWEL_LETTERS: &str = "aeouâêîôûäëïöüáéíóúàèìòùŵŷẅÿẃýẁỳ";

/// Letters whose reading depends on context.
const AMBIGUOUS_LETTERS: &str = "iwy";

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Lowercase a word and normalise the typographic apostrophe.
pub fn normalise(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .map(|c| if is_apostrophe(c) { '\'' } else { c })
        .collect()
}

/// Tokenized word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graphemes {
    pub units: Vec<String>,
    /// Positions in `units` before which an apostrophe was removed
    pub apostrophes: BTreeSet<usize>,
}

/// Split a word into graphemes.
///
/// Characters outside the alphabet are dropped; input is expected to have
/// been validated upstream.
pub fn tokenize(word: &str) -> Graphemes {
    let word = word.to_lowercase();
    let mut out = Graphemes::default();
    let mut rest = word.as_str();

    while let Some(c) = rest.chars().next() {
        if is_apostrophe(c) {
            out.apostrophes.insert(out.units.len());
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let cluster = TRIGRAPHS
            .iter()
            .chain(DIGRAPHS.iter())
            .find(|g| rest.starts_with(**g));
        if let Some(g) = cluster {
            out.units.push(g.to_string());
            rest = &rest[g.len()..];
            continue;
        }

        if CONSONANT_LETTERS.contains(c)
            || PLAIN_VOWEL_LETTERS.contains(c)
            || AMBIGUOUS_LETTERS.contains(c)
        {
            out.units.push(c.to_string());
        } else {
            log::debug!("Skipping unsupported character {:?} in {:?}", c, word);
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}

fn first_char(g: &str) -> Option<char> {
    g.chars().next()
}

/// Grapheme starts with a consonant letter.
pub fn is_consonant(g: &str) -> bool {
    first_char(g).is_some_and(|c| CONSONANT_LETTERS.contains(c))
}

/// Grapheme is a vowel letter other than `i`, `w` or `y`.
pub fn is_plain_vowel(g: &str) -> bool {
    first_char(g).is_some_and(|c| PLAIN_VOWEL_LETTERS.contains(c))
}

/// Grapheme may be read as a vowel, including `i`, `w` and `y`.
pub fn is_possible_vowel(g: &str) -> bool {
    first_char(g)
        .is_some_and(|c| PLAIN_VOWEL_LETTERS.contains(c) || AMBIGUOUS_LETTERS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(word: &str) -> Vec<String> {
        tokenize(word).units
    }

    #[test]
    fn test_tokenize_digraphs() {
        assert_eq!(units("llwybr"), vec!["ll", "w", "y", "b", "r"]);
        assert_eq!(units("cymraeg"), vec!["c", "y", "m", "r", "a", "e", "g"]);
        assert_eq!(units("rhaidd"), vec!["rh", "a", "i", "dd"]);
    }

    #[test]
    fn test_tokenize_trigraph_before_digraph() {
        assert_eq!(units("nghymru"), vec!["ngh", "y", "m", "r", "u"]);
        assert_eq!(units("angen"), vec!["a", "ng", "e", "n"]);
        assert_eq!(units("tshirt"), vec!["tsh", "i", "r", "t"]);
    }

    #[test]
    fn test_tokenize_diacritics() {
        assert_eq!(units("tŷ"), vec!["t", "ŷ"]);
        assert_eq!(units("ïodin"), vec!["ï", "o", "d", "i", "n"]);
    }

    #[test]
    fn test_tokenize_uppercase_input() {
        assert_eq!(units("LLAN"), vec!["ll", "a", "n"]);
    }

    #[test]
    fn test_apostrophes_removed_and_indexed() {
        let g = tokenize("gyda'r");
        assert_eq!(g.units, vec!["g", "y", "d", "a", "r"]);
        assert_eq!(g.apostrophes.iter().copied().collect::<Vec<_>>(), vec![4]);

        let g = tokenize("i’w");
        assert_eq!(g.units, vec!["i", "w"]);
        assert!(g.apostrophes.contains(&1));
    }

    #[test]
    fn test_trailing_apostrophe() {
        let g = tokenize("wy'");
        assert_eq!(g.units, vec!["w", "y"]);
        assert!(g.apostrophes.contains(&2));
    }

    #[test]
    fn test_unsupported_characters_skipped() {
        assert_eq!(units("zoo"), vec!["o", "o"]);
        assert_eq!(units("a-b"), vec!["a", "b"]);
    }

    #[test]
    fn test_letter_classes() {
        assert!(is_consonant("ll"));
        assert!(is_consonant("ngh"));
        assert!(!is_consonant("w"));
        assert!(!is_consonant("^"));
        assert!(is_plain_vowel("â"));
        assert!(is_plain_vowel("ŵ"));
        assert!(!is_plain_vowel("i"));
        assert!(!is_plain_vowel("y"));
        assert!(is_possible_vowel("w"));
        assert!(is_possible_vowel("e"));
        assert!(!is_possible_vowel("$"));
    }

    #[test]
    fn test_normalise() {
        assert_eq!(normalise("Trwy’r"), "trwy'r");
    }
}
