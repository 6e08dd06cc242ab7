//! Contextual readings of the ambiguous letters `i` and `w`.
//!
//! `i` is either the vowel /I/ or, after `s`, half of /sh/. `w` is either
//! the vowel /W/, the glide /w/, or fuses with a following `l`, `n` or `r`
//! into /wl/, /wn/, /wr/ (mutated `gwl-`, `gwn-`, `gwr-`).
//!
//! Each decision is an ordered list of named rules; the first rule that
//! fires wins. Several rules exist only to catch single lexical items and
//! are kept as-is.

use std::collections::BTreeSet;

use crate::types::Phone;

use super::graphemes::{is_consonant, is_plain_vowel, is_possible_vowel};

/// Consonant clusters an ambiguous letter can take part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    /// `s` + `i`: replaces the preceding /s/
    Sh,
    /// `w` + `l`: absorbs the following grapheme
    Wl,
    Wn,
    Wr,
}

impl Cluster {
    pub fn phone(self) -> &'static str {
        match self {
            Cluster::Sh => "sh",
            Cluster::Wl => "wl",
            Cluster::Wn => "wn",
            Cluster::Wr => "wr",
        }
    }

    /// The liquid cluster starting with `w` for a following grapheme.
    pub fn after_w(next: &str) -> Option<Cluster> {
        match next {
            "l" => Some(Cluster::Wl),
            "n" => Some(Cluster::Wn),
            "r" => Some(Cluster::Wr),
            _ => None,
        }
    }

    /// Whether the following grapheme is consumed by this cluster.
    pub fn absorbs_next(self) -> bool {
        !matches!(self, Cluster::Sh)
    }
}

/// How an ambiguous grapheme is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// /I/ or /W/
    Vowel,
    /// Glide /w/
    Consonant,
    Cluster(Cluster),
    Unclassified,
}

/// The rule that decided a reading, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub reading: Reading,
    pub rule: Option<&'static str>,
}

/// Everything a rule may look at.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    graphemes: &'a [String],
    index: usize,
    phones: &'a [Phone],
    apostrophes: &'a BTreeSet<usize>,
    lead: String,
    tail: String,
    word: String,
}

impl<'a> Context<'a> {
    /// `graphemes` is the apostrophe-free sequence, `phones` what has been
    /// emitted before `index`, `apostrophes` grapheme positions.
    pub fn new(
        graphemes: &'a [String],
        index: usize,
        phones: &'a [Phone],
        apostrophes: &'a BTreeSet<usize>,
    ) -> Self {
        Self {
            graphemes,
            index,
            phones,
            apostrophes,
            lead: graphemes[..index].concat(),
            tail: graphemes[index + 1..].concat(),
            word: graphemes.concat(),
        }
    }

    pub fn previous(&self) -> &str {
        match self.index.checked_sub(1) {
            Some(i) => self.graphemes[i].as_str(),
            None => "^",
        }
    }

    pub fn current(&self) -> &str {
        &self.graphemes[self.index]
    }

    pub fn next(&self) -> &str {
        self.graphemes
            .get(self.index + 1)
            .map(|s| s.as_str())
            .unwrap_or("$")
    }

    /// Unconsumed graphemes after the current one.
    pub fn following(&self) -> &[String] {
        &self.graphemes[self.index + 1..]
    }

    /// `following()` joined.
    pub fn tail(&self) -> &str {
        &self.tail
    }

    /// Graphemes before the current one, joined.
    pub fn lead(&self) -> &str {
        &self.lead
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    fn phones_end_with(&self, suffix: &[&str]) -> bool {
        self.phones.len() >= suffix.len()
            && self.phones[self.phones.len() - suffix.len()..]
                .iter()
                .zip(suffix)
                .all(|(p, s)| p == s)
    }

    /// Suffix test on the emitted phones run together, so `wr A W s`
    /// ends with `rAWs`.
    fn joined_phones_end_with(&self, suffix: &str) -> bool {
        self.phones.concat().ends_with(suffix)
    }

    fn tail_starts_with_any(&self, prefixes: &[&str]) -> bool {
        prefixes.iter().any(|p| self.tail.starts_with(p))
    }
}

/// A named, self-contained predicate.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&Context) -> Option<Reading>,
}

fn decide(rules: &[Rule], ctx: &Context) -> Decision {
    rules
        .iter()
        .find_map(|rule| {
            (rule.apply)(ctx).map(|reading| Decision {
                reading,
                rule: Some(rule.name),
            })
        })
        .unwrap_or(Decision {
            reading: Reading::Unclassified,
            rule: None,
        })
}

fn when(cond: bool, reading: Reading) -> Option<Reading> {
    cond.then_some(reading)
}

// --- i ---

const I_RULES: &[Rule] = &[
    Rule { name: "not-after-s", apply: i_not_after_s },
    Rule { name: "before-consonant", apply: i_before_consonant },
    Rule { name: "before-i", apply: i_before_i },
    Rule { name: "latin-sius", apply: i_latin_sius },
    Rule { name: "traws-compound", apply: i_traws_compound },
    Rule { name: "before-y", apply: i_before_y },
    Rule { name: "before-plain-vowel", apply: i_before_plain_vowel },
    Rule { name: "siwy-siwm-siwl", apply: i_siwy_siwm_siwl },
    Rule { name: "before-w", apply: i_before_w },
    Rule { name: "word-final", apply: i_word_final },
];

fn i_not_after_s(c: &Context) -> Option<Reading> {
    when(c.previous() != "s", Reading::Vowel)
}

fn i_before_consonant(c: &Context) -> Option<Reading> {
    when(is_consonant(c.next()), Reading::Vowel)
}

// sir, sid, siff, sit, sith
fn i_before_i(c: &Context) -> Option<Reading> {
    when(c.next() == "i", Reading::Vowel)
}

fn i_latin_sius(c: &Context) -> Option<Reading> {
    when(c.next() == "u", Reading::Vowel)
}

// trawsieithu, trawsiwerydd
fn i_traws_compound(c: &Context) -> Option<Reading> {
    when(c.joined_phones_end_with("rAWs"), Reading::Vowel)
}

fn i_before_y(c: &Context) -> Option<Reading> {
    when(c.next() == "y", Reading::Cluster(Cluster::Sh))
}

fn i_before_plain_vowel(c: &Context) -> Option<Reading> {
    when(is_plain_vowel(c.next()), Reading::Cluster(Cluster::Sh))
}

// siwyd, calsiwm, capsiwl: pronunciation varies, keep the vowel
fn i_siwy_siwm_siwl(c: &Context) -> Option<Reading> {
    when(c.tail_starts_with_any(&["wy", "wm", "wl"]), Reading::Vowel)
}

fn i_before_w(c: &Context) -> Option<Reading> {
    when(c.next() == "w", Reading::Cluster(Cluster::Sh))
}

fn i_word_final(c: &Context) -> Option<Reading> {
    when(c.following().is_empty(), Reading::Vowel)
}

/// Read an `i`.
pub fn classify_i(ctx: &Context) -> Decision {
    decide(I_RULES, ctx)
}

// --- w before l/n/r + vowel ---

const W_LIQUID_RULES: &[Rule] = &[
    Rule { name: "after-vowel", apply: wl_after_vowel },
    Rule { name: "gwryw-wria-wro", apply: wl_gwryw_wria_wro },
    Rule { name: "sgwl", apply: wl_sgwl },
    Rule { name: "initial-or-after-g", apply: wl_initial_or_after_g },
    Rule { name: "compound-wl", apply: wl_compound_wl },
    Rule { name: "compound-wn", apply: wl_compound_wn },
    Rule { name: "compound-wr", apply: wl_compound_wr },
    Rule { name: "default-vowel", apply: wl_default_vowel },
];

fn wl_after_vowel(c: &Context) -> Option<Reading> {
    when(is_possible_vowel(c.previous()), Reading::Vowel)
}

// gwryw, wriaeth, wrol
fn wl_gwryw_wria_wro(c: &Context) -> Option<Reading> {
    when(c.tail_starts_with_any(&["ryw", "ria", "ro"]), Reading::Vowel)
}

fn wl_sgwl(c: &Context) -> Option<Reading> {
    when(c.phones_end_with(&["s", "g"]) && c.next() == "l", Reading::Vowel)
}

fn wl_initial_or_after_g(c: &Context) -> Option<Reading> {
    let prev = c.previous();
    if (prev == "g" && !c.phones_end_with(&["s", "g"])) || prev == "^" {
        Cluster::after_w(c.next()).map(Reading::Cluster)
    } else {
        None
    }
}

// Mutated gw[lnr]- inside compounds, mined from a word list.
// "orwlych" can never follow an `l` and never fires.
fn wl_compound_wl(c: &Context) -> Option<Reading> {
    when(
        c.next() == "l"
            && c.tail_starts_with_any(&["lad", "ledydd", "ledd", "leidydd", "latgar", "orwlych"]),
        Reading::Cluster(Cluster::Wl),
    )
}

// The "after ym" arm looks for a lowercase y, which is never emitted, so
// only the neud/neuthur tails fire. The compound list was tuned that way.
fn wl_compound_wn(c: &Context) -> Option<Reading> {
    when(
        c.next() == "n"
            && (c.tail_starts_with_any(&["neud", "neuthur"]) || c.phones_end_with(&["y", "m"])),
        Reading::Cluster(Cluster::Wn),
    )
}

fn wl_compound_wr(c: &Context) -> Option<Reading> {
    when(
        c.next() == "r" && c.tail_starts_with_any(&["rand", "rend", "ragedd", "raig", "reidd"]),
        Reading::Cluster(Cluster::Wr),
    )
}

fn wl_default_vowel(_: &Context) -> Option<Reading> {
    Some(Reading::Vowel)
}

/// `w` directly followed by `l`, `n` or `r` and then a vowel letter.
pub fn has_liquid_shape(ctx: &Context) -> bool {
    let tail = ctx.following();
    tail.len() >= 2
        && Cluster::after_w(&tail[0]).is_some()
        && is_possible_vowel(&tail[1])
}

/// Read a `w`.
pub fn classify_w(ctx: &Context) -> Decision {
    if has_liquid_shape(ctx) {
        decide(W_LIQUID_RULES, ctx)
    } else {
        type_of_w(ctx)
    }
}

// --- w elsewhere: vowel or glide ---

const TYPE_OF_W_RULES: &[Rule] = &[
    Rule { name: "bwa-fwa-mwa-dwi", apply: w_bwa_fwa_mwa_dwi },
    Rule { name: "before-ryw", apply: w_before_ryw },
    Rule { name: "wy-apostrophe", apply: w_wy_apostrophe },
    Rule { name: "wyr-ending", apply: w_wyr_ending },
    Rule { name: "after-consonant", apply: w_after_consonant },
    Rule { name: "wyd-ending", apply: w_wyd_ending },
    Rule { name: "ogwydd-tramgwydd", apply: w_ogwydd_tramgwydd },
    Rule { name: "wy-gwy-frogwy-llugwy", apply: w_wy_words },
    Rule { name: "cwymp", apply: w_cwymp },
    Rule { name: "cwy-gwy-initial", apply: w_cwy_initial },
    Rule { name: "wy-default", apply: w_wy_default },
    Rule { name: "before-plain-vowel", apply: w_before_plain_vowel },
    Rule { name: "before-consonant", apply: w_before_consonant },
    Rule { name: "word-final", apply: w_word_final },
    Rule { name: "initial-before-i", apply: w_initial_before_i },
    Rule { name: "after-y-before-i-vowel", apply: w_after_y_before_i_vowel },
    Rule { name: "after-y-before-vowel", apply: w_after_y_before_vowel },
    Rule { name: "after-y", apply: w_after_y },
    Rule { name: "between-vowels", apply: w_between_vowels },
];

fn w_bwa_fwa_mwa_dwi(c: &Context) -> Option<Reading> {
    when(matches!(c.word(), "bwa" | "fwa" | "mwa" | "dwi"), Reading::Vowel)
}

fn w_before_ryw(c: &Context) -> Option<Reading> {
    when(c.tail().starts_with("ryw"), Reading::Vowel)
}

// wy' : the apostrophe sits right after the y
fn w_wy_apostrophe(c: &Context) -> Option<Reading> {
    when(
        c.tail().starts_with('y') && c.apostrophes.contains(&(c.index + 2)),
        Reading::Vowel,
    )
}

fn w_wyr_ending(c: &Context) -> Option<Reading> {
    when(c.tail() == "yr", Reading::Consonant)
}

fn w_after_consonant(c: &Context) -> Option<Reading> {
    when(
        is_consonant(c.previous()) && !c.tail().starts_with('y'),
        Reading::Vowel,
    )
}

fn w_wyd_ending(c: &Context) -> Option<Reading> {
    when(c.tail() == "yd", Reading::Vowel)
}

fn w_ogwydd_tramgwydd(c: &Context) -> Option<Reading> {
    let word = c.word();
    let tramgwydd = ["t", "d", "th", "nh"]
        .iter()
        .any(|m| word.strip_prefix(m).is_some_and(|w| w.starts_with("ramgwydd")));
    when(
        c.tail().starts_with('y') && (word == "ogwydd" || word == "gogwydd" || tramgwydd),
        Reading::Consonant,
    )
}

fn w_wy_words(c: &Context) -> Option<Reading> {
    when(
        c.tail().starts_with('y') && matches!(c.word(), "wy" | "gwy" | "frogwy" | "llugwy"),
        Reading::Vowel,
    )
}

fn lead_is_velar_onset(c: &Context) -> bool {
    matches!(c.lead(), "c" | "ch" | "g" | "ngh")
}

// cwympo and its mutations
fn w_cwymp(c: &Context) -> Option<Reading> {
    when(
        lead_is_velar_onset(c) && c.tail().starts_with("ymp"),
        Reading::Consonant,
    )
}

fn w_cwy_initial(c: &Context) -> Option<Reading> {
    when(
        c.tail().starts_with('y') && lead_is_velar_onset(c),
        Reading::Consonant,
    )
}

fn w_wy_default(c: &Context) -> Option<Reading> {
    when(c.tail().starts_with('y'), Reading::Vowel)
}

fn w_before_plain_vowel(c: &Context) -> Option<Reading> {
    when(is_plain_vowel(c.next()), Reading::Consonant)
}

fn w_before_consonant(c: &Context) -> Option<Reading> {
    when(is_consonant(c.next()), Reading::Vowel)
}

fn w_word_final(c: &Context) -> Option<Reading> {
    when(c.next() == "$", Reading::Vowel)
}

fn w_initial_before_i(c: &Context) -> Option<Reading> {
    when(c.previous() == "^" && c.next() == "i", Reading::Consonant)
}

fn w_after_y_before_i_vowel(c: &Context) -> Option<Reading> {
    let tail = c.following();
    when(
        c.previous() == "y" && tail.len() >= 2 && tail[0] == "i" && is_possible_vowel(&tail[1]),
        Reading::Vowel,
    )
}

fn w_after_y_before_vowel(c: &Context) -> Option<Reading> {
    when(
        c.previous() == "y" && is_possible_vowel(c.next()),
        Reading::Consonant,
    )
}

// bywgraffiad, cywrain: needs more work
fn w_after_y(c: &Context) -> Option<Reading> {
    when(c.previous() == "y", Reading::Vowel)
}

fn w_between_vowels(c: &Context) -> Option<Reading> {
    let vowel_or_i = |g: &str| is_plain_vowel(g) || g == "i";
    when(
        vowel_or_i(c.previous()) && vowel_or_i(c.next()),
        Reading::Consonant,
    )
}

/// Read a `w` that is not followed by a liquid + vowel.
pub fn type_of_w(ctx: &Context) -> Decision {
    decide(TYPE_OF_W_RULES, ctx)
}
