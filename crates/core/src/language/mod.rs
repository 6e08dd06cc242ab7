//! Welsh grapheme-to-phoneme rules, one module per pipeline stage.

pub mod context;
pub mod diphthongs;
pub mod exceptions;
pub mod g2p;
pub mod graphemes;
pub mod phonotactics;
pub mod stress;
pub mod syllabify;

pub use exceptions::Exceptions;
pub use g2p::{word_to_phones, word_to_stressed_phones, G2p};
