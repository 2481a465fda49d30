//! Sequence number generator
//!
//! The generator reads its clock, maps the instant to a tick through its
//! `SequenceLayout`, and fills the suffix according to its mode.
//!
//! # Memory Ordering
//!
//! PseudoUnique mode touches no shared state. StronglyOrdered mode keeps the
//! last issued value in one `AtomicU64` and advances it with `fetch_update`
//! under SeqCst, so every instance has a single modification order that all
//! of its callers observe.

use crate::entropy::{EntropySource, OsEntropy};
use crate::layout::{SequenceLayout, SequenceNumber, TickReading};
use handlegen_core::{Clock, Orientation, Result, SystemClock};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// How the suffix of a sequence number is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Fresh OS entropy per call; unique with high probability
    PseudoUnique,
    /// Instance-owned counter; ordered, not unique under bursts
    StronglyOrdered,
}

/// Generates time-ordered sequence numbers
///
/// Safe to share across threads (`Arc<SequenceNumberGenerator>` or `&`).
pub struct SequenceNumberGenerator {
    layout: SequenceLayout,
    mode: GenerationMode,
    clock: Arc<dyn Clock>,
    entropy: Arc<dyn EntropySource>,
    /// Last value issued in StronglyOrdered mode
    last: AtomicU64,
}

impl SequenceNumberGenerator {
    /// Create a generator reading the system clock and OS entropy
    pub fn new(layout: SequenceLayout, mode: GenerationMode) -> Self {
        debug!(
            target: "handlegen::sequence",
            ?mode,
            suffix_bits = layout.suffix_bits(),
            tick_ms = layout.tick().as_millis() as u64,
            orientation = %layout.orientation(),
            horizon = %layout.horizon(),
            "Sequence number generator created"
        );
        Self {
            layout,
            mode,
            clock: Arc::new(SystemClock),
            entropy: Arc::new(OsEntropy),
            last: AtomicU64::new(initial_state(&layout)),
        }
    }

    /// PseudoUnique generator
    pub fn pseudo_unique(layout: SequenceLayout) -> Self {
        Self::new(layout, GenerationMode::PseudoUnique)
    }

    /// StronglyOrdered generator
    pub fn strongly_ordered(layout: SequenceLayout) -> Self {
        Self::new(layout, GenerationMode::StronglyOrdered)
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the entropy source
    pub fn with_entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    /// Layout values are packed with
    pub fn layout(&self) -> &SequenceLayout {
        &self.layout
    }

    /// Generation mode
    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Generate the next sequence number
    ///
    /// # Errors
    ///
    /// `Error::Entropy` if the entropy source fails (PseudoUnique only).
    pub fn next(&self) -> Result<SequenceNumber> {
        match self.mode {
            GenerationMode::PseudoUnique => self.next_pseudo_unique(),
            GenerationMode::StronglyOrdered => Ok(self.next_strongly_ordered()),
        }
    }

    fn current_tick(&self) -> u64 {
        let now = self.clock.now();
        let reading = self.layout.tick_at(now);
        match reading {
            TickReading::InRange(_) => {}
            TickReading::BeforeEpoch => {
                warn!(
                    target: "handlegen::sequence",
                    now = %now,
                    epoch = %self.layout.epoch(),
                    "Clock reads before epoch, clamping to first tick"
                );
            }
            TickReading::PastHorizon(_) => {
                warn!(
                    target: "handlegen::sequence",
                    now = %now,
                    horizon = %self.layout.horizon(),
                    "Clock reads past horizon, clamping to last tick"
                );
            }
        }
        reading.tick()
    }

    fn next_pseudo_unique(&self) -> Result<SequenceNumber> {
        let tick = self.current_tick();
        let suffix = self.entropy.next_u64().map_err(|e| {
            error!(target: "handlegen::sequence", error = %e, "Entropy source failed");
            e
        })?;
        Ok(self.layout.compose(tick, suffix))
    }

    fn next_strongly_ordered(&self) -> SequenceNumber {
        let layout = self.layout;
        let mut issued = SequenceNumber::from_raw(0);
        // The closure always returns Some, so fetch_update cannot fail.
        let _ = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                let tick = self.current_tick();
                let prefix = layout.time_prefix(tick);
                let last = SequenceNumber::from_raw(last);
                let suffix = if layout.prefix_of(last) == prefix {
                    step_suffix(&layout, layout.suffix_of(last))
                } else {
                    first_suffix(&layout)
                };
                issued = layout.compose(tick, suffix);
                Some(issued.as_u64())
            });
        issued
    }
}

impl std::fmt::Debug for SequenceNumberGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceNumberGenerator")
            .field("layout", &self.layout)
            .field("mode", &self.mode)
            .field("last", &self.last.load(Ordering::Relaxed))
            .finish()
    }
}

/// First suffix issued in a fresh tick
fn first_suffix(layout: &SequenceLayout) -> u64 {
    match layout.orientation() {
        Orientation::Increasing => 0,
        Orientation::Decreasing => layout.suffix_mask(),
    }
}

/// Next suffix within the same tick, saturating at the end of the range
fn step_suffix(layout: &SequenceLayout, suffix: u64) -> u64 {
    match layout.orientation() {
        Orientation::Increasing => suffix.saturating_add(1).min(layout.suffix_mask()),
        Orientation::Decreasing => suffix.saturating_sub(1),
    }
}

/// Counter state before the first call: as if the horizon tick had issued
/// its first value, so only a clock clamped at the horizon continues it.
fn initial_state(layout: &SequenceLayout) -> u64 {
    layout
        .compose(layout.max_tick(), first_suffix(layout))
        .as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use handlegen_core::{Error, ManualClock, Timestamp};
    use std::time::Duration;

    /// Hands out 0, 1, 2, ... as "entropy"
    #[derive(Default)]
    struct CountingEntropy(AtomicU64);

    impl EntropySource for CountingEntropy {
        fn fill(&self, dest: &mut [u8]) -> Result<()> {
            let n = self.0.fetch_add(1, Ordering::SeqCst).to_le_bytes();
            for (d, s) in dest.iter_mut().zip(n.iter().cycle()) {
                *d = *s;
            }
            Ok(())
        }
    }

    struct FailingEntropy;

    impl EntropySource for FailingEntropy {
        fn fill(&self, _dest: &mut [u8]) -> Result<()> {
            Err(Error::Entropy("exhausted".to_string()))
        }
    }

    const EPOCH: Timestamp = Timestamp::from_millis(1_000_000);

    fn layout(suffix_bits: u32, orientation: Orientation) -> SequenceLayout {
        SequenceLayout::new(EPOCH, Duration::from_millis(1), suffix_bits, orientation).unwrap()
    }

    fn generator(
        mode: GenerationMode,
        suffix_bits: u32,
        orientation: Orientation,
    ) -> (SequenceNumberGenerator, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(EPOCH.saturating_add(Duration::from_millis(100))));
        let gen = SequenceNumberGenerator::new(layout(suffix_bits, orientation), mode)
            .with_clock(clock.clone())
            .with_entropy(Arc::new(CountingEntropy::default()));
        (gen, clock)
    }

    #[test]
    fn test_pseudo_unique_uses_entropy_as_suffix() {
        let (gen, _clock) = generator(GenerationMode::PseudoUnique, 8, Orientation::Increasing);
        let a = gen.next().unwrap();
        let b = gen.next().unwrap();
        assert_eq!(gen.layout().suffix_of(a), 0);
        assert_eq!(gen.layout().suffix_of(b), 1);
        assert_eq!(gen.layout().tick_of(a), 100);
        assert_eq!(gen.layout().tick_of(b), 100);
    }

    #[test]
    fn test_pseudo_unique_time_dominates_increasing() {
        let (gen, clock) = generator(GenerationMode::PseudoUnique, 8, Orientation::Increasing);
        let earlier = gen.next().unwrap();
        clock.advance(Duration::from_millis(1));
        let later = gen.next().unwrap();
        assert!(later > earlier);
    }

    #[test]
    fn test_pseudo_unique_time_dominates_decreasing() {
        let (gen, clock) = generator(GenerationMode::PseudoUnique, 8, Orientation::Decreasing);
        let earlier = gen.next().unwrap();
        clock.advance(Duration::from_millis(1));
        let later = gen.next().unwrap();
        assert!(later < earlier);
    }

    #[test]
    fn test_entropy_failure_is_returned() {
        let gen = SequenceNumberGenerator::pseudo_unique(layout(23, Orientation::Decreasing))
            .with_entropy(Arc::new(FailingEntropy));
        let err = gen.next().unwrap_err();
        assert!(matches!(err, Error::Entropy(_)));
    }

    #[test]
    fn test_strongly_ordered_counts_within_tick() {
        let (gen, _clock) = generator(GenerationMode::StronglyOrdered, 8, Orientation::Increasing);
        let suffixes: Vec<u64> = (0..5)
            .map(|_| gen.layout().suffix_of(gen.next().unwrap()))
            .collect();
        assert_eq!(suffixes, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_strongly_ordered_restarts_on_new_tick() {
        let (gen, clock) = generator(GenerationMode::StronglyOrdered, 8, Orientation::Increasing);
        let a = gen.next().unwrap();
        let b = gen.next().unwrap();
        clock.advance(Duration::from_millis(3));
        let c = gen.next().unwrap();
        assert!(a < b && b < c);
        assert_eq!(gen.layout().suffix_of(c), 0);
        assert_eq!(gen.layout().tick_of(c), 103);
    }

    #[test]
    fn test_strongly_ordered_saturates_into_duplicates() {
        let (gen, _clock) = generator(GenerationMode::StronglyOrdered, 2, Orientation::Increasing);
        let values: Vec<SequenceNumber> = (0..6).map(|_| gen.next().unwrap()).collect();
        let suffixes: Vec<u64> = values.iter().map(|&v| gen.layout().suffix_of(v)).collect();
        assert_eq!(suffixes, vec![0, 1, 2, 3, 3, 3]);

        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(sorted, values);
    }

    #[test]
    fn test_strongly_ordered_decreasing() {
        let (gen, clock) = generator(GenerationMode::StronglyOrdered, 2, Orientation::Decreasing);
        let mut values: Vec<SequenceNumber> = (0..6).map(|_| gen.next().unwrap()).collect();
        clock.advance(Duration::from_millis(1));
        values.push(gen.next().unwrap());

        let suffixes: Vec<u64> = values.iter().map(|&v| gen.layout().suffix_of(v)).collect();
        assert_eq!(suffixes, vec![3, 2, 1, 0, 0, 0, 3]);

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sorted, values);
    }

    #[test]
    fn test_strongly_ordered_instances_do_not_share_state() {
        let (first, _c1) = generator(GenerationMode::StronglyOrdered, 8, Orientation::Increasing);
        let (second, _c2) = generator(GenerationMode::StronglyOrdered, 8, Orientation::Increasing);
        for _ in 0..10 {
            first.next().unwrap();
        }
        assert_eq!(second.layout().suffix_of(second.next().unwrap()), 0);
    }

    #[test]
    fn test_clock_before_epoch_clamps_to_first_tick() {
        let (gen, clock) = generator(GenerationMode::PseudoUnique, 8, Orientation::Increasing);
        clock.set(Timestamp::from_millis(5));
        assert_eq!(gen.layout().tick_of(gen.next().unwrap()), 0);
    }

    #[test]
    fn test_clock_rollback_is_not_corrected() {
        let (gen, clock) = generator(GenerationMode::StronglyOrdered, 8, Orientation::Increasing);
        let before = gen.next().unwrap();
        clock.set(EPOCH.saturating_add(Duration::from_millis(50)));
        let after = gen.next().unwrap();
        // Generated later, sorts earlier
        assert!(after < before);
    }

    #[test]
    fn test_mode_accessor() {
        let gen = SequenceNumberGenerator::strongly_ordered(layout(8, Orientation::Increasing));
        assert_eq!(gen.mode(), GenerationMode::StronglyOrdered);
    }
}
