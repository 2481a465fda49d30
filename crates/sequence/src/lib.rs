//! Time-ordered 64-bit sequence numbers
//!
//! A sequence number packs a tick count (time since a fixed epoch) into its
//! high bits and a suffix into its low bits:
//!
//! ```text
//! 63                       suffix_bits                0
//! +-----------------------------+---------------------+
//! |  time prefix (oriented)     |  suffix             |
//! +-----------------------------+---------------------+
//! ```
//!
//! The time prefix always dominates, so values from different ticks order
//! by tick regardless of suffix. Two generation modes fill the suffix:
//!
//! - [`GenerationMode::PseudoUnique`]: fresh OS entropy per call. Values in
//!   the same tick collide with probability 2^-suffix_bits per pair.
//! - [`GenerationMode::StronglyOrdered`]: an instance-owned atomic counter.
//!   Strict order within the instance; duplicates once a tick's range runs out.
//!
//! The generator trusts its clock. A clock that steps backwards yields
//! values that sort as if generated earlier; nothing corrects for it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entropy;
pub mod generator;
pub mod layout;

pub use entropy::{EntropySource, OsEntropy};
pub use generator::{GenerationMode, SequenceNumberGenerator};
pub use layout::{SequenceLayout, SequenceNumber, TickReading};
