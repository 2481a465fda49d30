//! Bit layout of a sequence number
//!
//! `SequenceLayout` owns every constant that shapes a sequence number: the
//! epoch tick zero refers to, the tick width, the number of suffix bits, and
//! the orientation of the time prefix. Callers' collision expectations are
//! derived from `suffix_bits`, so it is fixed at construction.

use handlegen_core::{
    Error, GeneratorConfig, Orientation, Result, Timestamp, DEFAULT_EPOCH_MILLIS,
    DEFAULT_SHORT_ENTROPY_BITS, DEFAULT_TICK_MILLIS, MAX_ENTROPY_BITS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A time-ordered 64-bit value
///
/// Compares as its raw integer. Two values from different ticks of the same
/// layout always order by tick, in the layout's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceNumber(u64);

impl SequenceNumber {
    /// Wrap a raw value
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        SequenceNumber(raw)
    }

    /// Raw value
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for SequenceNumber {
    fn from(raw: u64) -> Self {
        SequenceNumber(raw)
    }
}

impl From<SequenceNumber> for u64 {
    fn from(seq: SequenceNumber) -> Self {
        seq.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Where the clock falls relative to the representable tick range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickReading {
    /// Inside the range
    InRange(u64),
    /// Before the epoch, clamped to tick 0
    BeforeEpoch,
    /// Past the horizon, clamped to the last tick
    PastHorizon(u64),
}

impl TickReading {
    /// Tick after clamping
    pub fn tick(&self) -> u64 {
        match *self {
            TickReading::InRange(t) | TickReading::PastHorizon(t) => t,
            TickReading::BeforeEpoch => 0,
        }
    }
}

/// Bit split and time base of a sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceLayout {
    epoch: Timestamp,
    tick: Duration,
    suffix_bits: u32,
    orientation: Orientation,
}

impl SequenceLayout {
    /// Create a layout
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `tick` is under one millisecond or `suffix_bits` is
    /// outside `1..=MAX_ENTROPY_BITS`.
    pub fn new(
        epoch: Timestamp,
        tick: Duration,
        suffix_bits: u32,
        orientation: Orientation,
    ) -> Result<Self> {
        if tick.as_millis() == 0 {
            return Err(Error::InvalidConfig(
                "tick must be at least one millisecond".to_string(),
            ));
        }
        if suffix_bits == 0 || suffix_bits > MAX_ENTROPY_BITS {
            return Err(Error::InvalidConfig(format!(
                "suffix_bits must be in 1..={}, got {}",
                MAX_ENTROPY_BITS, suffix_bits
            )));
        }
        Ok(Self {
            epoch,
            tick,
            suffix_bits,
            orientation,
        })
    }

    /// Layout for the handle sequence number described by `config`
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Self::new(
            config.epoch_timestamp(),
            config.tick(),
            config.short_entropy_bits,
            config.orientation,
        )
    }

    /// Same layout with a different orientation
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Instant of tick zero
    pub fn epoch(&self) -> Timestamp {
        self.epoch
    }

    /// Tick width
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Low-order bits given to the suffix
    pub fn suffix_bits(&self) -> u32 {
        self.suffix_bits
    }

    /// High-order bits given to the time prefix
    pub fn time_bits(&self) -> u32 {
        u64::BITS - self.suffix_bits
    }

    /// Orientation of the time prefix
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Mask selecting the suffix
    #[inline]
    pub fn suffix_mask(&self) -> u64 {
        (1u64 << self.suffix_bits) - 1
    }

    /// Largest representable tick
    #[inline]
    pub fn max_tick(&self) -> u64 {
        (1u64 << self.time_bits()) - 1
    }

    /// Last instant whose tick is representable
    pub fn horizon(&self) -> Timestamp {
        let tick_millis = self.tick.as_millis() as u64;
        Timestamp::from_millis(
            self.epoch
                .as_millis()
                .saturating_add(self.max_tick().saturating_mul(tick_millis)),
        )
    }

    /// Tick for the instant `now`, clamped into `0..=max_tick`
    pub fn tick_at(&self, now: Timestamp) -> TickReading {
        match now.ticks_since(self.epoch, self.tick) {
            None => TickReading::BeforeEpoch,
            Some(t) if t > self.max_tick() => TickReading::PastHorizon(self.max_tick()),
            Some(t) => TickReading::InRange(t),
        }
    }

    /// Oriented time prefix for `tick`
    ///
    /// Decreasing orientation subtracts from the maximum, which equals the
    /// bitwise complement within `time_bits`.
    #[inline]
    pub fn time_prefix(&self, tick: u64) -> u64 {
        let tick = tick.min(self.max_tick());
        match self.orientation {
            Orientation::Increasing => tick,
            Orientation::Decreasing => self.max_tick() - tick,
        }
    }

    /// Pack a tick and suffix into a sequence number
    ///
    /// Suffix bits above `suffix_bits` are discarded.
    #[inline]
    pub fn compose(&self, tick: u64, suffix: u64) -> SequenceNumber {
        SequenceNumber((self.time_prefix(tick) << self.suffix_bits) | (suffix & self.suffix_mask()))
    }

    /// Raw oriented prefix of `seq`
    #[inline]
    pub fn prefix_of(&self, seq: SequenceNumber) -> u64 {
        seq.0 >> self.suffix_bits
    }

    /// Suffix of `seq`
    #[inline]
    pub fn suffix_of(&self, seq: SequenceNumber) -> u64 {
        seq.0 & self.suffix_mask()
    }

    /// Tick `seq` was generated in
    pub fn tick_of(&self, seq: SequenceNumber) -> u64 {
        let prefix = self.prefix_of(seq);
        match self.orientation {
            Orientation::Increasing => prefix,
            Orientation::Decreasing => self.max_tick() - prefix,
        }
    }
}

impl Default for SequenceLayout {
    /// The layout `GeneratorConfig::default()` describes
    fn default() -> Self {
        Self {
            epoch: Timestamp::from_millis(DEFAULT_EPOCH_MILLIS as u64),
            tick: Duration::from_millis(DEFAULT_TICK_MILLIS),
            suffix_bits: DEFAULT_SHORT_ENTROPY_BITS,
            orientation: Orientation::Decreasing,
        }
    }
}
