//! Generator configuration
//!
//! Every tuning knob is a constructor-time constant. `GeneratorConfig::default()`
//! carries the compiled-in values and is what the process-wide generator uses;
//! a `handlegen.toml` file is only needed to override them (tests, tooling).
//! Changing any value changes the collision bounds callers rely on, and
//! changing `epoch`, `tick_millis` or `orientation` breaks ordering against
//! handles already issued.

use crate::error::{Error, Result};
use crate::timestamp::Timestamp;
use crate::types::Orientation;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Config file name used by tooling that persists a generator config.
pub const CONFIG_FILE_NAME: &str = "handlegen.toml";

/// Default epoch: 2024-01-01T00:00:00Z in Unix milliseconds
pub const DEFAULT_EPOCH_MILLIS: i64 = 1_704_067_200_000;

/// Default tick width in milliseconds
///
/// Fine enough that handles minted 10 ms apart always land in different
/// ticks, coarse enough that bursts share one.
pub const DEFAULT_TICK_MILLIS: u64 = 1;

/// Default entropy width of a short handle
///
/// Leaves 41 time bits, about 69 years of 1 ms ticks past the epoch.
pub const DEFAULT_SHORT_ENTROPY_BITS: u32 = 23;

/// Default number of extra random symbols appended to a long handle
///
/// Each symbol carries 6 bits, so long handles have 23 + 12 = 35 entropy bits.
pub const DEFAULT_LONG_EXTENSION_SYMBOLS: usize = 2;

/// Upper bound on entropy bits inside a sequence number (leaves 16 time bits)
pub const MAX_ENTROPY_BITS: u32 = 48;

/// Upper bound on long handle extension symbols
pub const MAX_EXTENSION_SYMBOLS: usize = 4;

/// Handle generator configuration
///
/// # Example
///
/// ```toml
/// epoch = "2024-01-01T00:00:00Z"
/// tick_millis = 1
/// short_entropy_bits = 23
/// long_extension_symbols = 2
/// orientation = "decreasing"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Instant that tick zero corresponds to
    #[serde(default = "default_epoch")]
    pub epoch: DateTime<Utc>,
    /// Width of one tick in milliseconds
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Random bits in the low end of every handle's sequence number
    #[serde(default = "default_short_entropy_bits")]
    pub short_entropy_bits: u32,
    /// Extra random 6-bit symbols appended to long handles
    #[serde(default = "default_long_extension_symbols")]
    pub long_extension_symbols: usize,
    /// Direction handles sort in over time
    #[serde(default)]
    pub orientation: Orientation,
}

fn default_epoch() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(DEFAULT_EPOCH_MILLIS)
        .single()
        .unwrap_or_default()
}

fn default_tick_millis() -> u64 {
    DEFAULT_TICK_MILLIS
}

fn default_short_entropy_bits() -> u32 {
    DEFAULT_SHORT_ENTROPY_BITS
}

fn default_long_extension_symbols() -> usize {
    DEFAULT_LONG_EXTENSION_SYMBOLS
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            tick_millis: DEFAULT_TICK_MILLIS,
            short_entropy_bits: DEFAULT_SHORT_ENTROPY_BITS,
            long_extension_symbols: DEFAULT_LONG_EXTENSION_SYMBOLS,
            orientation: Orientation::Decreasing,
        }
    }
}

impl GeneratorConfig {
    /// Check every field is within the range the generator supports.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.tick_millis == 0 {
            return Err(Error::InvalidConfig(
                "tick_millis must be at least 1".to_string(),
            ));
        }
        if self.short_entropy_bits == 0 || self.short_entropy_bits > MAX_ENTROPY_BITS {
            return Err(Error::InvalidConfig(format!(
                "short_entropy_bits must be in 1..={}, got {}",
                MAX_ENTROPY_BITS, self.short_entropy_bits
            )));
        }
        if self.long_extension_symbols > MAX_EXTENSION_SYMBOLS {
            return Err(Error::InvalidConfig(format!(
                "long_extension_symbols must be at most {}, got {}",
                MAX_EXTENSION_SYMBOLS, self.long_extension_symbols
            )));
        }
        Ok(())
    }

    /// Epoch as a `Timestamp`
    pub fn epoch_timestamp(&self) -> Timestamp {
        Timestamp::from_datetime(&self.epoch)
    }

    /// Tick width as a `Duration`
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Total entropy bits carried by a long handle
    pub fn long_entropy_bits(&self) -> u32 {
        self.short_entropy_bits + 6 * self.long_extension_symbols as u32
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Handle generator configuration
#
# Changing epoch, tick_millis or orientation breaks ordering against
# handles that were already issued.
epoch = "2024-01-01T00:00:00Z"

# Width of one time tick in milliseconds (default: 1)
tick_millis = 1

# Random bits per sequence number (default: 23, max: 48)
short_entropy_bits = 23

# Extra random 6-bit symbols appended to long handles (default: 2, max: 4)
long_extension_symbols = 2

# "decreasing" (newest sorts first, default) or "increasing"
orientation = "decreasing"
"#
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidConfig(msg) => {
                Error::InvalidConfig(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;
        debug!(target: "handlegen::config", path = %path.display(), "Loaded generator config");
        Ok(config)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
