//! String collations and the alphabet each one sorts correctly
//!
//! Both alphabets hold the same 64 characters. They differ in rank: each
//! alphabet lists its characters in ascending order under its own
//! collation, so a symbol's index equals the numeric value it encodes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Number of symbols in every alphabet
pub const ALPHABET_SIZE: usize = 64;

/// Alphabet in ascending byte order
pub const ORDINAL_ALPHABET: &[u8; ALPHABET_SIZE] =
    b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Alphabet in ascending dictionary order
pub const LEXICOGRAPHIC_ALPHABET: &[u8; ALPHABET_SIZE] =
    b"-_0123456789aAbBcCdDeEfFgGhHiIjJkKlLmMnNoOpPqQrRsStTuUvVwWxXyYzZ";

/// Marks a byte that is not part of an alphabet
const NOT_IN_ALPHABET: u8 = 0xFF;

const ORDINAL_RANKS: [u8; 256] = build_ranks(ORDINAL_ALPHABET);
const LEXICOGRAPHIC_RANKS: [u8; 256] = build_ranks(LEXICOGRAPHIC_ALPHABET);
const DICTIONARY_WEIGHTS: [u16; 256] = build_dictionary_weights();

const fn build_ranks(alphabet: &[u8; ALPHABET_SIZE]) -> [u8; 256] {
    let mut ranks = [NOT_IN_ALPHABET; 256];
    let mut i = 0;
    while i < ALPHABET_SIZE {
        ranks[alphabet[i] as usize] = i as u8;
        i += 1;
    }
    ranks
}

/// Dictionary weight of every byte
///
/// Printable punctuation first (in byte order), then digits, then letters
/// with each lowercase letter directly before its uppercase form. Control
/// and non-ASCII bytes sort after all of those, in byte order.
const fn build_dictionary_weights() -> [u16; 256] {
    let mut weights = [0u16; 256];
    let mut next: u16 = 0;

    let mut b = 0x20usize;
    while b <= 0x7E {
        let is_digit = b >= b'0' as usize && b <= b'9' as usize;
        let is_upper = b >= b'A' as usize && b <= b'Z' as usize;
        let is_lower = b >= b'a' as usize && b <= b'z' as usize;
        if !is_digit && !is_upper && !is_lower {
            weights[b] = next;
            next += 1;
        }
        b += 1;
    }

    b = b'0' as usize;
    while b <= b'9' as usize {
        weights[b] = next;
        next += 1;
        b += 1;
    }

    b = b'a' as usize;
    while b <= b'z' as usize {
        weights[b] = next;
        weights[b - 0x20] = next + 1;
        next += 2;
        b += 1;
    }

    b = 0;
    while b < 256 {
        if b < 0x20 || b > 0x7E {
            weights[b] = 0x100 + b as u16;
        }
        b += 1;
    }
    weights
}

/// String comparison regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Collation {
    /// Byte-wise comparison, as used by the store's range scans
    #[default]
    Ordinal,
    /// Dictionary comparison: punctuation, digits, then `aAbB..zZ`
    Lexicographic,
}

impl Collation {
    /// The 64 symbols in ascending order under this collation
    #[inline]
    pub fn alphabet(&self) -> &'static [u8; ALPHABET_SIZE] {
        match self {
            Collation::Ordinal => ORDINAL_ALPHABET,
            Collation::Lexicographic => LEXICOGRAPHIC_ALPHABET,
        }
    }

    /// Symbol for a 6-bit group value
    #[inline]
    pub(crate) fn symbol(&self, group: u64) -> char {
        self.alphabet()[(group & 0x3F) as usize] as char
    }

    /// Rank of `byte` in this collation's alphabet
    #[inline]
    pub fn rank(&self, byte: u8) -> Option<u8> {
        let rank = match self {
            Collation::Ordinal => ORDINAL_RANKS[byte as usize],
            Collation::Lexicographic => LEXICOGRAPHIC_RANKS[byte as usize],
        };
        (rank != NOT_IN_ALPHABET).then_some(rank)
    }

    /// Compare two strings under this collation
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Collation::Ordinal => a.as_bytes().cmp(b.as_bytes()),
            Collation::Lexicographic => a
                .bytes()
                .map(|c| DICTIONARY_WEIGHTS[c as usize])
                .cmp(b.bytes().map(|c| DICTIONARY_WEIGHTS[c as usize])),
        }
    }

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Collation::Ordinal => "ordinal",
            Collation::Lexicographic => "lexicographic",
        }
    }

    /// Look up a collation by identifier
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "ordinal" => Some(Collation::Ordinal),
            "lexicographic" => Some(Collation::Lexicographic),
            _ => None,
        }
    }
}

impl fmt::Display for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted_under(collation: Collation) {
        let alphabet = collation.alphabet();
        for pair in alphabet.windows(2) {
            let a = (pair[0] as char).to_string();
            let b = (pair[1] as char).to_string();
            assert_eq!(
                collation.compare(&a, &b),
                Ordering::Less,
                "{} not below {} under {}",
                a,
                b,
                collation
            );
        }
    }

    #[test]
    fn test_alphabets_sorted_under_own_collation() {
        assert_sorted_under(Collation::Ordinal);
        assert_sorted_under(Collation::Lexicographic);
    }

    #[test]
    fn test_alphabets_share_character_set() {
        let mut ordinal = ORDINAL_ALPHABET.to_vec();
        let mut lexicographic = LEXICOGRAPHIC_ALPHABET.to_vec();
        ordinal.sort_unstable();
        lexicographic.sort_unstable();
        assert_eq!(ordinal, lexicographic);
        ordinal.dedup();
        assert_eq!(ordinal.len(), ALPHABET_SIZE);
    }

    #[test]
    fn test_rank_matches_index() {
        for collation in [Collation::Ordinal, Collation::Lexicographic] {
            for (i, &c) in collation.alphabet().iter().enumerate() {
                assert_eq!(collation.rank(c), Some(i as u8));
            }
            assert_eq!(collation.rank(b'#'), None);
            assert_eq!(collation.rank(b' '), None);
            assert_eq!(collation.rank(0xC3), None);
        }
    }

    #[test]
    fn test_ordinal_and_lexicographic_disagree() {
        // Uppercase sorts before all lowercase byte-wise, but interleaves
        // with lowercase in dictionary order.
        assert_eq!(Collation::Ordinal.compare("Z", "a"), Ordering::Less);
        assert_eq!(Collation::Lexicographic.compare("Z", "a"), Ordering::Greater);

        // '_' sits between letters byte-wise but before digits in a dictionary.
        assert_eq!(Collation::Ordinal.compare("_", "0"), Ordering::Greater);
        assert_eq!(Collation::Lexicographic.compare("_", "0"), Ordering::Less);
    }

    #[test]
    fn test_shorter_prefix_sorts_first() {
        for collation in [Collation::Ordinal, Collation::Lexicographic] {
            assert_eq!(collation.compare("ab", "abc"), Ordering::Less);
            assert_eq!(collation.compare("abc", "abc"), Ordering::Equal);
        }
    }

    #[test]
    fn test_collation_id_round_trip() {
        for collation in [Collation::Ordinal, Collation::Lexicographic] {
            assert_eq!(Collation::from_id(collation.id()), Some(collation));
        }
        assert_eq!(Collation::from_id("culture"), None);
    }
}
