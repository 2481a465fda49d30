//! Error types for handlegen
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for handlegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed input to the order-preserving decoder
///
/// Self-generated handles never produce this error. It only surfaces when
/// decoding externally supplied or corrupted text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Text does not have the fixed encoded length
    #[error("invalid encoded length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required number of symbols
        expected: usize,
        /// Number of bytes actually supplied
        actual: usize,
    },

    /// A symbol is not part of the configured alphabet
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        /// The offending character
        symbol: char,
        /// Byte offset of the offending character
        position: usize,
    },

    /// The leading symbol encodes more bits than a u64 can hold
    #[error("leading symbol {symbol:?} overflows a 64-bit value")]
    Overflow {
        /// The offending leading character
        symbol: char,
    },
}

/// Error types for handlegen
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed encoded text
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The entropy source could not produce random bytes
    ///
    /// Fatal for the call that hit it. Never retried and never replaced by a
    /// weaker source.
    #[error("Entropy source failure: {0}")]
    Entropy(String),

    /// Configuration rejected by validation or parsing
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error (config file operations)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}
