//! Order-preserving text encoding for 64-bit values
//!
//! Maps a `u64` to a fixed-length printable string whose string order
//! matches the integer order, and back. Two collations are supported, each
//! with its own alphabet permutation:
//!
//! - [`Collation::Ordinal`]: byte-wise comparison, the order the backing
//!   key-value store uses for range scans. The only one safe to rely on.
//! - [`Collation::Lexicographic`]: dictionary comparison (symbols, digits,
//!   then `aAbB..zZ`). Kept so the mismatch with `Ordinal` stays visible.
//!
//! # Usage
//!
//! ```
//! use handlegen_encoding::{decode, encode, Collation};
//!
//! let text = encode(42, Collation::Ordinal);
//! assert_eq!(text.len(), handlegen_encoding::ENCODED_LEN);
//! assert_eq!(decode(&text, Collation::Ordinal).unwrap(), 42);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod collation;

pub use codec::{
    decode, decode_symbols, encode, encode_into, encode_symbols, BITS_PER_SYMBOL, ENCODED_LEN,
    LEADING_SYMBOL_BITS,
};
pub use collation::{Collation, ALPHABET_SIZE, LEXICOGRAPHIC_ALPHABET, ORDINAL_ALPHABET};
