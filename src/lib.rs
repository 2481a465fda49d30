//! Handlegen - time-ordered handles for key-value backed services
//!
//! Handles are fixed-length ASCII strings whose byte-wise order follows
//! creation time, newest first by default, so a range scan over a key-value
//! store returns the most recent records without a secondary index.
//!
//! # Quick Start
//!
//! ```
//! let comment_id = handlegen::generate_short_handle()?;
//! let blob_id = handlegen::generate_long_handle()?;
//! assert_eq!(comment_id.len(), 11);
//! assert_eq!(blob_id.len(), 13);
//! # Ok::<(), handlegen::Error>(())
//! ```
//!
//! Services that need a non-default epoch, entropy budget or orientation
//! build their own [`HandleGenerator`] from a [`GeneratorConfig`].
//!
//! # Architecture
//!
//! - `handlegen-core`: errors, time, clock and configuration
//! - `handlegen-encoding`: order-preserving 64-bit to text codec
//! - `handlegen-sequence`: time-prefixed 64-bit sequence numbers
//! - `handlegen-handles`: the handle generator built on the two above

use once_cell::sync::Lazy;

pub use handlegen_core::{
    Clock, DecodeError, Error, GeneratorConfig, ManualClock, Orientation, Result, SystemClock,
    Timestamp, CONFIG_FILE_NAME,
};
pub use handlegen_encoding::{decode, encode, Collation, ENCODED_LEN};
pub use handlegen_handles::{Handle, HandleGenerator, HandleKind};
pub use handlegen_sequence::{
    EntropySource, GenerationMode, OsEntropy, SequenceLayout, SequenceNumber,
    SequenceNumberGenerator,
};

/// Process-wide generator with the default configuration
static DEFAULT_GENERATOR: Lazy<HandleGenerator> = Lazy::new(HandleGenerator::new);

/// The process-wide default generator
pub fn default_generator() -> &'static HandleGenerator {
    &DEFAULT_GENERATOR
}

/// Mint a short handle from the default generator
///
/// For high-volume entities where an occasional collision under bursts is
/// acceptable (comments, replies, likes).
pub fn generate_short_handle() -> Result<Handle> {
    DEFAULT_GENERATOR.generate_short_handle()
}

/// Mint a long handle from the default generator
///
/// For entities where a collision is costly (blobs, images).
pub fn generate_long_handle() -> Result<Handle> {
    DEFAULT_GENERATOR.generate_long_handle()
}
