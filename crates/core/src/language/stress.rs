//! Post-syllabification passes: vowel reduction, stress, accent removal.
//!
//! Each pass takes the syllables by value and returns them rewritten;
//! only nuclei change, so the onset/coda phones are never touched.

use crate::types::{Phone, Syllable};

/// Suffix marking the stressed vowel.
pub const STRESS_MARK: char = '1';

/// Nucleus → reduced nucleus, applied to non-final syllables only.
const SCHWA_REPLACEMENTS: &[(&[&str], &[&str])] = &[
    // chwythu, and the usual y
    (&["Y"], &["@"]),
    // miliynau, cwestiynau
    (&["I", "Y"], &["I", "@"]),
    // amryw, cywion, cywrain
    (&["YW"], &["@W"]),
];

/// Accents that attract stress: circumflex and acute.
const STRESSING_ACCENTS: &str = "ÂÊÎÔÛŴŶÁÉÍÓÚẂÝ";

/// Every accented capital, grouped by diacritic in `BASE_VOWELS` order.
const ACCENTED: &str = "ÂÊÎÔÛŴŶÁÉÍÓÚẂÝÀÈÌÒÙẀỲÄËÏÖÜẄŸ";
const BASE_VOWELS: &[char] = &['A', 'E', 'I', 'O', 'U', 'W', 'Y'];

/// Replace non-final nuclei found in the reduction table.
pub fn reduce_vowels(syllables: Vec<Syllable>) -> Vec<Syllable> {
    syllables
        .into_iter()
        .map(|mut syl| {
            if !syl.is_final {
                if let Some((_, reduced)) = SCHWA_REPLACEMENTS
                    .iter()
                    .find(|(from, _)| syl.nucleus.iter().eq(from.iter()))
                {
                    syl.nucleus = reduced.iter().map(|s| s.to_string()).collect();
                }
            }
            syl
        })
        .collect()
}

fn carries_stressing_accent(vowel: &str) -> bool {
    vowel
        .chars()
        .next()
        .is_some_and(|c| STRESSING_ACCENTS.contains(c))
}

fn mark(vowel: &mut Phone) {
    vowel.push(STRESS_MARK);
}

/// Mark exactly one vowel as stressed.
///
/// The last accented vowel in the word wins; without one, the penult is
/// stressed, or the only syllable of a monosyllable.
pub fn assign_stress(mut syllables: Vec<Syllable>) -> Vec<Syllable> {
    let accented = syllables.iter().enumerate().rev().find_map(|(s, syl)| {
        syl.nucleus
            .iter()
            .rposition(|v| carries_stressing_accent(v))
            .map(|v| (s, v))
    });

    let target = accented.or_else(|| {
        let s = syllables.len().checked_sub(2).or(syllables.len().checked_sub(1))?;
        let v = syllables[s].nucleus.len().checked_sub(1)?;
        Some((s, v))
    });

    if let Some((s, v)) = target {
        mark(&mut syllables[s].nucleus[v]);
    }
    syllables
}

fn base_letter(c: char) -> char {
    ACCENTED
        .chars()
        .position(|a| a == c)
        .map(|i| BASE_VOWELS[i % BASE_VOWELS.len()])
        .unwrap_or(c)
}

/// Replace accented vowels with their plain letters.
pub fn strip_accents(syllables: Vec<Syllable>) -> Vec<Syllable> {
    syllables
        .into_iter()
        .map(|mut syl| {
            syl.nucleus = syl
                .nucleus
                .iter()
                .map(|v| v.chars().map(base_letter).collect())
                .collect();
            syl
        })
        .collect()
}

/// Whether a phone carries the stress mark.
pub fn is_stressed(phone: &str) -> bool {
    phone.ends_with(STRESS_MARK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Vec<Phone> {
        s.split_whitespace().map(String::from).collect()
    }

    fn syl(onset: &str, nucleus: &str, coda: &str, is_final: bool) -> Syllable {
        Syllable {
            onset: p(onset),
            nucleus: p(nucleus),
            coda: p(coda),
            is_final,
        }
    }

    fn nuclei(syls: &[Syllable]) -> Vec<String> {
        syls.iter().map(|s| s.nucleus.join(" ")).collect()
    }

    #[test]
    fn test_reduce_non_final() {
        let syls = vec![syl("c", "Y", "m", false), syl("r", "AE", "g", true)];
        assert_eq!(nuclei(&reduce_vowels(syls)), vec!["@", "AE"]);

        let syls = vec![syl("t", "YW", "", false), syl("", "Y", "dd", true)];
        assert_eq!(nuclei(&reduce_vowels(syls)), vec!["@W", "Y"]);

        let syls = vec![syl("m", "I", "l", false), syl("", "I Y", "n", false), syl("", "AU", "", true)];
        assert_eq!(nuclei(&reduce_vowels(syls)), vec!["I", "I @", "AU"]);
    }

    #[test]
    fn test_reduce_never_touches_final() {
        let syls = vec![syl("d", "Y", "n", true)];
        assert_eq!(nuclei(&reduce_vowels(syls)), vec!["Y"]);
        // WY is not reduced either
        let syls = vec![syl("g", "WY", "dd", false), syl("", "E", "l", true)];
        assert_eq!(nuclei(&reduce_vowels(syls)), vec!["WY", "E"]);
    }

    #[test]
    fn test_stress_penult() {
        let syls = vec![syl("c", "@", "m", false), syl("r", "AE", "g", true)];
        assert_eq!(nuclei(&assign_stress(syls)), vec!["@1", "AE"]);
    }

    #[test]
    fn test_stress_monosyllable_last_vowel() {
        let syls = vec![syl("", "I AI", "th", true)];
        assert_eq!(nuclei(&assign_stress(syls)), vec!["I AI1"]);
    }

    #[test]
    fn test_stress_last_accent_wins() {
        let syls = vec![
            syl("c", "Â", "", false),
            syl("s", "I Â", "", false),
            syl("", "U", "", true),
        ];
        assert_eq!(nuclei(&assign_stress(syls)), vec!["Â", "I Â1", "U"]);
    }

    #[test]
    fn test_stress_ignores_grave_and_diaeresis() {
        let syls = vec![syl("", "I", "", false), syl("", "O", "d", false), syl("", "Ï", "n", true)];
        assert_eq!(nuclei(&assign_stress(syls)), vec!["I", "O1", "Ï"]);
    }

    #[test]
    fn test_stress_empty() {
        assert!(assign_stress(vec![]).is_empty());
    }

    #[test]
    fn test_strip_accents_keeps_stress() {
        let syls = vec![syl("t", "Ŷ1", "", true), syl("", "ÀÄ", "", true)];
        assert_eq!(nuclei(&strip_accents(syls)), vec!["Y1", "AA"]);
    }

    #[test]
    fn test_base_letter() {
        assert_eq!(base_letter('Ŵ'), 'W');
        assert_eq!(base_letter('Ẃ'), 'W');
        assert_eq!(base_letter('Ỳ'), 'Y');
        assert_eq!(base_letter('Ÿ'), 'Y');
        assert_eq!(base_letter('Ï'), 'I');
        assert_eq!(base_letter('@'), '@');
    }

    #[test]
    fn test_is_stressed() {
        assert!(is_stressed("WY1"));
        assert!(!is_stressed("WY"));
    }
}
