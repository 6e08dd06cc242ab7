//! Phone classes and the onset/coda cluster tables used by the syllabifier.
//!
//! Table order matters: the syllabifier takes the first listed cluster that
//! matches, so longer clusters come before their prefixes.

/// Onset clusters in priority order. `-` separates phones.
const ONSET_TABLE: &str = "
    ch-d ll-n
    s-b-r s-b-l s-t-r s-g-l s-g-r
    p-l p-n p-r ff-l ff-r b-l b-n b-r mh-l mh-r f-l f-r m-l m-r
    t-l t-r th-l th-r d-l d-r nh-l nh-r dd-r n-r s-d s-ff
    c-l c-r c-n ch-l ch-r ch-n g-l g-n g-r ngh-l ngh-r ngh-n ng-l ng-r
    g-w c-w ch-w
    s-b s-t s-g s-l s-m s-n
    ng-wl ng-wn ng-wr
    g-wl g-wn g-wr
    wl wn wr
    p b t d c g m n ng r ff f th dd
    s sh ch ll w
    l ts chw dz h mh nh ngh rh z
    j
";

/// Coda clusters in priority order.
const CODA_TABLE: &str = "
    n-c-r n-c-l n-c-s n-d-r n-t-r n-d-l m-b-l m-b-r l-ts l-d-s r-ts g-l-s
    s-t-r m-p-l s-t-l s-ts r-p-s ff-ts c-ts n-ts m-p-s
    r-ts n-d-s s-g-l r-f-s d-l-s r-d-s c-ts r-c-s n-c-t
    f-r c-r g-l th-r c-l n-s d-r p-r t-r d-n th-m
    s-l ff-r ff-l f-l b-r p-l g-r g-n t-l ch-r s-m
    n-t r-dd r-n r-ch r-th s-t s-g ll-t n-s l-ch c-s r-s n-c r-t r-f r-d
    l-s ts n-d m-p r-m r-c r-ff ng-l c-t ff-t l-d l-t p-s d-s l-c m-s l-m
    l-ff r-p l-f dd-f s-b r-ts l-p m-l r-l n-ts t-t n-th ng-s m-b ff-s
    f-s p-t r-ll g-s r-g l-ts ch-t th-s l-b r-b b-s n-j s-c ff-ts
    m-ff m-n l-g th-t s-ts
    w-n
    n-n r-r f-n b-l d-l d-r
    tsh
    p b t d c g m n ng r ff f th dd
    s sh ch ll w
    l ts dz rh z
    j
";

fn parse_clusters(table: &'static str) -> Vec<Vec<&'static str>> {
    table
        .split_whitespace()
        .map(|cluster| cluster.split('-').collect())
        .collect()
}

lazy_static::lazy_static! {
    /// Licit onsets, first match wins.
    pub static ref ONSETS: Vec<Vec<&'static str>> = parse_clusters(ONSET_TABLE);

    /// Licit codas, first match wins.
    pub static ref CODAS: Vec<Vec<&'static str>> = parse_clusters(CODA_TABLE);
}

/// Vowel phones are written in capitals; `@` is the schwa.
pub fn is_vowel_phone(phone: &str) -> bool {
    phone == "@"
        || (phone.chars().any(char::is_uppercase) && !phone.chars().any(char::is_lowercase))
}

/// The first cluster in `table` that `phones` starts with.
pub fn match_front<'t, P: AsRef<str>>(
    table: &'t [Vec<&'static str>],
    phones: &[P],
) -> Option<&'t [&'static str]> {
    table
        .iter()
        .find(|cluster| {
            cluster.len() <= phones.len()
                && cluster.iter().zip(phones).all(|(c, p)| *c == p.as_ref())
        })
        .map(|cluster| cluster.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_vowel_phone() {
        assert!(is_vowel_phone("A"));
        assert!(is_vowel_phone("WY"));
        assert!(is_vowel_phone("@"));
        assert!(is_vowel_phone("@W"));
        assert!(is_vowel_phone("Â"));
        assert!(is_vowel_phone("E1"));
        assert!(!is_vowel_phone("w"));
        assert!(!is_vowel_phone("wl"));
        assert!(!is_vowel_phone("ll"));
        assert!(!is_vowel_phone(""));
    }

    #[test]
    fn test_tables_parsed_in_order() {
        assert_eq!(ONSETS[0], vec!["ch", "d"]);
        assert_eq!(ONSETS.last().unwrap(), &vec!["j"]);
        assert_eq!(CODAS[0], vec!["n", "c", "r"]);
        assert!(ONSETS.iter().any(|c| c == &vec!["ng", "wl"]));
    }

    #[test]
    fn test_match_front_prefers_listed_order() {
        let phones = ["s", "t", "r", "A"];
        assert_eq!(match_front(&ONSETS, &phones), Some(&["s", "t", "r"][..]));

        let phones = ["s", "g", "O", "l"];
        assert_eq!(match_front(&CODAS, &phones), Some(&["s", "g"][..]));
    }

    #[test]
    fn test_match_front_none() {
        let phones = ["A", "n"];
        assert_eq!(match_front(&ONSETS, &phones), None);
        let empty: [&str; 0] = [];
        assert_eq!(match_front(&CODAS, &empty), None);
    }
}
