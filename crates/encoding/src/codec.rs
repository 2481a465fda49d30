//! Fixed-length order-preserving codec
//!
//! A `u64` is split into 6-bit groups from the most significant end. The
//! leading symbol carries the top 4 bits, the remaining ten carry 6 bits
//! each. Output is always `ENCODED_LEN` symbols: a shorter string would be a
//! byte-wise prefix of, and sort before, any longer string sharing it,
//! whatever the numbers.

use crate::collation::Collation;
use handlegen_core::DecodeError;

/// Bits carried by every symbol
pub const BITS_PER_SYMBOL: u32 = 6;

/// Symbols in an encoded `u64`
pub const ENCODED_LEN: usize = 11;

/// Bits carried by the leading symbol (64 - 10 * 6)
pub const LEADING_SYMBOL_BITS: u32 = u64::BITS - (ENCODED_LEN as u32 - 1) * BITS_PER_SYMBOL;

/// Most symbols `encode_symbols`/`decode_symbols` handle without truncation
const MAX_FULL_SYMBOLS: usize = (u64::BITS / BITS_PER_SYMBOL) as usize;

/// Encode `value` as an `ENCODED_LEN`-symbol string
pub fn encode(value: u64, collation: Collation) -> String {
    let mut out = String::with_capacity(ENCODED_LEN);
    encode_into(value, collation, &mut out);
    out
}

/// Append the encoding of `value` to `out`
pub fn encode_into(value: u64, collation: Collation, out: &mut String) {
    for i in (0..ENCODED_LEN as u32).rev() {
        out.push(collation.symbol(value >> (i * BITS_PER_SYMBOL)));
    }
}

/// Encode the low `6 * count` bits of `value` as exactly `count` symbols
///
/// Higher bits are dropped. Positions past the 64th bit are zero-filled with
/// the alphabet's lowest symbol.
pub fn encode_symbols(value: u64, count: usize, collation: Collation) -> String {
    let mut out = String::with_capacity(count);
    for i in (0..count as u32).rev() {
        let group = value.checked_shr(i * BITS_PER_SYMBOL).unwrap_or(0);
        out.push(collation.symbol(group));
    }
    out
}

/// Decode an `ENCODED_LEN`-symbol string back to the value it encodes
///
/// # Errors
///
/// - `InvalidLength` if `text` is not exactly `ENCODED_LEN` bytes
/// - `InvalidSymbol` if a byte is not in the collation's alphabet
/// - `Overflow` if the leading symbol encodes more than `LEADING_SYMBOL_BITS`
pub fn decode(text: &str, collation: Collation) -> Result<u64, DecodeError> {
    if text.len() != ENCODED_LEN {
        return Err(DecodeError::InvalidLength {
            expected: ENCODED_LEN,
            actual: text.len(),
        });
    }

    let value = accumulate(text, collation)?;

    let leading = text.as_bytes()[0];
    if let Some(rank) = collation.rank(leading) {
        if u32::from(rank) >> LEADING_SYMBOL_BITS != 0 {
            return Err(DecodeError::Overflow {
                symbol: leading as char,
            });
        }
    }
    Ok(value)
}

/// Decode exactly `count` symbols produced by `encode_symbols`
///
/// `count` is capped at 10 symbols (60 bits).
pub fn decode_symbols(text: &str, count: usize, collation: Collation) -> Result<u64, DecodeError> {
    let count = count.min(MAX_FULL_SYMBOLS);
    if text.len() != count {
        return Err(DecodeError::InvalidLength {
            expected: count,
            actual: text.len(),
        });
    }
    accumulate(text, collation)
}

fn accumulate(text: &str, collation: Collation) -> Result<u64, DecodeError> {
    let mut value: u64 = 0;
    for (position, &byte) in text.as_bytes().iter().enumerate() {
        let rank = collation.rank(byte).ok_or_else(|| DecodeError::InvalidSymbol {
            // Every byte before `position` was ASCII, so this is a char boundary
            symbol: text[position..].chars().next().unwrap_or(byte as char),
            position,
        })?;
        value = (value << BITS_PER_SYMBOL) | u64::from(rank);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: [Collation; 2] = [Collation::Ordinal, Collation::Lexicographic];

    #[test]
    fn test_leading_symbol_bits() {
        assert_eq!(LEADING_SYMBOL_BITS, 4);
    }

    #[test]
    fn test_zero_and_max_round_trip() {
        for collation in BOTH {
            let zero = encode(0, collation);
            let max = encode(u64::MAX, collation);
            assert_eq!(zero.len(), ENCODED_LEN);
            assert_eq!(max.len(), ENCODED_LEN);
            assert_eq!(decode(&zero, collation).unwrap(), 0);
            assert_eq!(decode(&max, collation).unwrap(), u64::MAX);
            assert_eq!(
                collation.compare(&zero, &max),
                std::cmp::Ordering::Less
            );
        }
    }

    #[test]
    fn test_zero_is_lowest_symbol_repeated() {
        assert_eq!(encode(0, Collation::Ordinal), "-----------");
        assert_eq!(encode(0, Collation::Lexicographic), "-----------");
    }

    #[test]
    fn test_known_ordinal_values() {
        assert_eq!(encode(1, Collation::Ordinal), "----------0");
        assert_eq!(encode(63, Collation::Ordinal), "----------z");
        assert_eq!(encode(64, Collation::Ordinal), "---------0-");
        assert_eq!(encode(u64::MAX, Collation::Ordinal), "Ezzzzzzzzzz");
    }

    #[test]
    fn test_known_lexicographic_values() {
        assert_eq!(encode(1, Collation::Lexicographic), "----------_");
        assert_eq!(encode(63, Collation::Lexicographic), "----------Z");
        assert_eq!(encode(u64::MAX, Collation::Lexicographic), "BZZZZZZZZZZ");
    }

    #[test]
    fn test_decode_wrong_length() {
        let err = decode("abc", Collation::Ordinal).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidLength {
                expected: ENCODED_LEN,
                actual: 3
            }
        );
        assert!(decode("", Collation::Ordinal).is_err());
        assert!(decode("------------", Collation::Ordinal).is_err());
    }

    #[test]
    fn test_decode_invalid_symbol() {
        let err = decode("-----#-----", Collation::Ordinal).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidSymbol {
                symbol: '#',
                position: 5
            }
        );
    }

    #[test]
    fn test_decode_non_ascii_symbol() {
        // 9 ASCII bytes + one 2-byte char = 11 bytes
        let text = "---------é";
        assert_eq!(text.len(), ENCODED_LEN);
        let err = decode(text, Collation::Ordinal).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidSymbol {
                symbol: 'é',
                position: 9
            }
        );
    }

    #[test]
    fn test_decode_leading_overflow() {
        // 'F' has ordinal rank 16, one past the 4-bit range
        let err = decode("F----------", Collation::Ordinal).unwrap_err();
        assert_eq!(err, DecodeError::Overflow { symbol: 'F' });
    }

    #[test]
    fn test_collations_do_not_decode_each_other() {
        let value = 0x0123_4567_89AB_CDEF;
        let ordinal = encode(value, Collation::Ordinal);
        let decoded = decode(&ordinal, Collation::Lexicographic);
        assert_ne!(decoded.ok(), Some(value));
    }

    #[test]
    fn test_encode_symbols() {
        assert_eq!(encode_symbols(0, 2, Collation::Ordinal), "--");
        assert_eq!(encode_symbols(0xFFF, 2, Collation::Ordinal), "zz");
        // Bits above 6 * count are dropped
        assert_eq!(encode_symbols(0x1000, 2, Collation::Ordinal), "--");
        assert_eq!(encode_symbols(5, 0, Collation::Ordinal), "");
        // Past 64 bits pads with the lowest symbol
        assert_eq!(encode_symbols(u64::MAX, 12, Collation::Ordinal).len(), 12);
        assert_eq!(encode_symbols(u64::MAX, 12, Collation::Ordinal), "-Ezzzzzzzzzz");
    }

    #[test]
    fn test_decode_symbols() {
        for collation in BOTH {
            let text = encode_symbols(0xABC, 2, collation);
            assert_eq!(decode_symbols(&text, 2, collation).unwrap(), 0xABC);
        }
        assert!(decode_symbols("---", 2, Collation::Ordinal).is_err());
        assert!(decode_symbols("-!", 2, Collation::Ordinal).is_err());
    }

    #[test]
    fn test_encode_into_appends() {
        let mut out = String::from("x:");
        encode_into(64, Collation::Ordinal, &mut out);
        assert_eq!(out, "x:---------0-");
    }
}
