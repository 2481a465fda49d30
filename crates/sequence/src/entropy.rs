//! Entropy sources for pseudo-unique suffixes
//!
//! Every call draws fresh bytes from the operating system CSPRNG. A shared
//! generator seeded from the clock would hand identical streams to callers
//! that start in the same instant, and collide far more often than the
//! suffix width predicts (see `tests/entropy_tests.rs`).

use handlegen_core::{Error, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// A thread-safe source of random bytes
///
/// Failures are returned, never papered over with a weaker source.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` with random bytes
    fn fill(&self, dest: &mut [u8]) -> Result<()>;

    /// Draw a random u64
    fn next_u64(&self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        self.fill(&mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }
}

/// Operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| Error::Entropy(e.to_string()))
    }
}
