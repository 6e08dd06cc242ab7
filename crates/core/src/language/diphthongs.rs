//! Fuse adjacent vowel phones into diphthongs.

use std::collections::BTreeSet;

use crate::types::Phone;

/// Vowel pairs realised as one phone.
pub const DIPHTHONGS: &[(&str, &str)] = &[
    ("I", "W"),
    ("E", "W"),
    ("A", "W"),
    ("O", "W"),
    ("Y", "W"),
    ("O", "I"),
    ("A", "I"),
    ("E", "I"),
    ("A", "U"),
    ("A", "E"),
    ("O", "E"),
    ("W", "Y"),
    ("E", "U"),
    ("U", "W"),
];

fn is_diphthong(a: &str, b: &str) -> bool {
    DIPHTHONGS.iter().any(|&(x, y)| x == a && y == b)
}

/// Merge diphthong pairs in one left-to-right pass.
///
/// A merged phone is not merged again. Apostrophe positions are carried
/// into the new coordinates; one that fell inside a merged pair now
/// follows the diphthong.
pub fn merge(phones: &[Phone], apostrophes: &BTreeSet<usize>) -> (Vec<Phone>, BTreeSet<usize>) {
    let mut out: Vec<Phone> = Vec::with_capacity(phones.len());
    let mut moved = BTreeSet::new();
    let mut i = 0;

    while i < phones.len() {
        if apostrophes.contains(&i) {
            moved.insert(out.len());
        }
        if i + 1 < phones.len() && is_diphthong(&phones[i], &phones[i + 1]) {
            out.push(format!("{}{}", phones[i], phones[i + 1]));
            if apostrophes.contains(&(i + 1)) {
                moved.insert(out.len());
            }
            i += 2;
        } else {
            out.push(phones[i].clone());
            i += 1;
        }
    }
    if apostrophes.contains(&phones.len()) {
        moved.insert(out.len());
    }

    (out, moved)
}
