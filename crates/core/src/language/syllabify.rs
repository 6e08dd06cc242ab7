//! Syllabification: phone sequence → (onset, nucleus, coda) groups.
//!
//! Left-greedy: each syllable takes the first listed onset, a vowel
//! nucleus, then the first listed coda, so consonants stay with the
//! preceding vowel where the coda table allows. There is no backtracking.

use std::collections::BTreeSet;

use crate::error::NoVowelInSyllable;
use crate::types::{Phone, Syllable};

use super::phonotactics::{is_vowel_phone, match_front, CODAS, ONSETS};

/// Vowel that lets the nucleus run on (`iad`, `iaith` as one syllable).
const EXTENDING_VOWEL: &str = "I";

/// Split phones into syllables.
///
/// `apostrophes` are phone positions before which an apostrophe was
/// elided. A syllable is final at the end of the word, or when an
/// apostrophe sits anywhere from just after its nucleus up to just after
/// its coda.
pub fn split_syllables(
    phones: &[Phone],
    apostrophes: &BTreeSet<usize>,
) -> Result<Vec<Syllable>, NoVowelInSyllable> {
    let mut syllables = Vec::new();
    let mut pos = 0;

    while pos < phones.len() {
        let onset = match_front(&ONSETS, &phones[pos..]).unwrap_or(&[]);
        let mut cursor = pos + onset.len();

        let mut nucleus: Vec<Phone> = Vec::new();
        while let Some(phone) = phones.get(cursor).filter(|p| is_vowel_phone(p)) {
            nucleus.push(phone.clone());
            cursor += 1;
            if phone != EXTENDING_VOWEL {
                break;
            }
        }
        if nucleus.is_empty() {
            return Err(NoVowelInSyllable {
                phones: phones.to_vec(),
                remaining: phones[cursor..].to_vec(),
            });
        }

        let nucleus_end = cursor;
        let coda = match_front(&CODAS, &phones[nucleus_end..]).unwrap_or(&[]);
        let end = nucleus_end + coda.len();

        let is_final = end == phones.len() || apostrophes.range(nucleus_end..=end).next().is_some();

        syllables.push(Syllable {
            onset: onset.iter().map(|s| s.to_string()).collect(),
            nucleus,
            coda: coda.iter().map(|s| s.to_string()).collect(),
            is_final,
        });
        pos = end;
    }

    Ok(syllables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::flatten;

    fn p(s: &str) -> Vec<Phone> {
        s.split_whitespace().map(String::from).collect()
    }

    fn shorts(syls: &[Syllable]) -> String {
        syls.iter().map(|s| s.short()).collect()
    }

    fn split(s: &str) -> Vec<Syllable> {
        split_syllables(&p(s), &BTreeSet::new()).unwrap()
    }

    #[test]
    fn test_split_single_syllable() {
        let syls = split("g wl A d");
        assert_eq!(syls.len(), 1);
        assert_eq!(syls[0].onset, p("g wl"));
        assert_eq!(syls[0].nucleus, p("A"));
        assert_eq!(syls[0].coda, p("d"));
        assert!(syls[0].is_final);
    }

    #[test]
    fn test_split_left_greedy_codas() {
        assert_eq!(shorts(&split("c Y m r AE g")), "(c Y m)(r AE g$)");
        assert_eq!(shorts(&split("Y s g O l")), "(. Y sg)(. O l$)");
        assert_eq!(shorts(&split("ff E n E s t r")), "(ff E n)(. E str$)");
    }

    #[test]
    fn test_split_three_phone_onset() {
        let syls = split("s t r Y d");
        assert_eq!(syls[0].onset, p("s t r"));
    }

    #[test]
    fn test_split_i_extends_nucleus() {
        assert_eq!(shorts(&split("I AI th")), "(. IAI th$)");
        assert_eq!(shorts(&split("c EI l I O g")), "(c EI l)(. IO g$)");
        // any other vowel closes the nucleus
        assert_eq!(shorts(&split("b W A")), "(b W .)(. A .$)");
    }

    #[test]
    fn test_split_reconstructs_phones() {
        for word in ["t r AW s I EI th U", "ch W A r AE", "@ m wn EU d", "c W E s t IW n"] {
            let phones = p(word);
            let syls = split_syllables(&phones, &BTreeSet::new()).unwrap();
            assert_eq!(flatten(&syls), phones, "{word}");
        }
    }

    #[test]
    fn test_apostrophe_after_nucleus_marks_final() {
        // dw'i
        let ap: BTreeSet<usize> = [2].into_iter().collect();
        let syls = split_syllables(&p("d W I"), &ap).unwrap();
        assert_eq!(shorts(&syls), "(d W .$)(. I .$)");
    }

    #[test]
    fn test_apostrophe_in_later_syllable() {
        // two syllables before the apostrophe: offsets must be tracked
        let ap: BTreeSet<usize> = [4].into_iter().collect();
        let syls = split_syllables(&p("c A n A s I"), &ap).unwrap();
        assert_eq!(shorts(&syls), "(c A n)(. A s$)(. I .$)");
    }

    #[test]
    fn test_apostrophe_not_in_window() {
        // an apostrophe before the onset belongs to the previous syllable
        let ap: BTreeSet<usize> = [0].into_iter().collect();
        let syls = split_syllables(&p("c A n A"), &ap).unwrap();
        assert!(!syls[0].is_final);
    }

    #[test]
    fn test_no_vowel() {
        let err = split_syllables(&p("b c d"), &BTreeSet::new()).unwrap_err();
        assert_eq!(err.phones, p("b c d"));
        assert_eq!(err.remaining, p("c d"));

        let err = split_syllables(&p("s b r d"), &BTreeSet::new()).unwrap_err();
        assert_eq!(err.remaining, p("d"));
    }

    #[test]
    fn test_no_vowel_after_onset() {
        // no ngh-w onset, so the glide is left without a vowel
        let err = split_syllables(&p("ngh w Y m p O"), &BTreeSet::new()).unwrap_err();
        assert_eq!(err.remaining, p("w Y m p O"));
    }

    #[test]
    fn test_empty_input() {
        assert!(split_syllables(&[], &BTreeSet::new()).unwrap().is_empty());
    }
}
