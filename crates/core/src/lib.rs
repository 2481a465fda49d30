//! Core types for handlegen
//!
//! This crate defines the foundational types shared by the encoder, the
//! sequence number generator, and the handle generator:
//! - Error / DecodeError: Error type hierarchy
//! - Timestamp: Millisecond wall-clock instant
//! - Clock: Time source seam (SystemClock, ManualClock)
//! - Orientation: Direction in which generated values sort over time
//! - GeneratorConfig: Constructor-time tuning, optionally loaded from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod error;
pub mod timestamp;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    GeneratorConfig, CONFIG_FILE_NAME, DEFAULT_EPOCH_MILLIS, DEFAULT_LONG_EXTENSION_SYMBOLS,
    DEFAULT_SHORT_ENTROPY_BITS, DEFAULT_TICK_MILLIS, MAX_ENTROPY_BITS, MAX_EXTENSION_SYMBOLS,
};
pub use error::{DecodeError, Error, Result};
pub use timestamp::Timestamp;
pub use types::Orientation;
