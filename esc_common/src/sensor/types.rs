//! Channel and sample types.

use std::fmt;
use std::num::NonZeroU16;

/// One ESC temperature sensor slot, identified by a 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(NonZeroU16);

impl Channel {
    /// Create a channel from its 1-based index. Returns `None` for 0.
    pub fn new(index: u16) -> Option<Self> {
        NonZeroU16::new(index).map(Self)
    }

    /// 1-based channel index.
    #[inline]
    pub fn index(self) -> u16 {
        self.0.get()
    }

    /// 0-based slot for indexing per-channel arrays.
    #[inline]
    pub fn slot(self) -> usize {
        usize::from(self.0.get() - 1)
    }

    /// Iterate channels `1..=count` in ascending order.
    pub fn all(count: u16) -> impl Iterator<Item = Channel> {
        (1..=count).filter_map(Channel::new)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ESC{}", self.0)
    }
}

/// Temperature reading for one channel at one tick [°C].
///
/// `None` means the reading was unavailable this tick. It is never
/// treated as zero.
pub type Sample = Option<f64>;

/// Inclusive band of physically plausible readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibleRange {
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
}

impl PlausibleRange {
    /// Create a new band.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` is finite and inside the band.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Coerce a raw reading into a sample. Out-of-band values become absent.
    #[inline]
    pub fn accept(&self, value: f64) -> Sample {
        self.contains(value).then_some(value)
    }
}

impl Default for PlausibleRange {
    fn default() -> Self {
        Self::new(
            crate::consts::DEFAULT_MIN_PLAUSIBLE,
            crate::consts::DEFAULT_MAX_PLAUSIBLE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_zero_is_rejected() {
        assert!(Channel::new(0).is_none());
        let ch = Channel::new(3).unwrap();
        assert_eq!(ch.index(), 3);
        assert_eq!(ch.slot(), 2);
        assert_eq!(ch.to_string(), "ESC3");
    }

    #[test]
    fn channel_all_is_ascending() {
        let idx: Vec<u16> = Channel::all(4).map(Channel::index).collect();
        assert_eq!(idx, vec![1, 2, 3, 4]);
        assert_eq!(Channel::all(0).count(), 0);
    }

    #[test]
    fn plausible_range_bounds_are_inclusive() {
        let band = PlausibleRange::default();
        assert_eq!(band.accept(-50.0), Some(-50.0));
        assert_eq!(band.accept(300.0), Some(300.0));
        assert_eq!(band.accept(500.0), None);
        assert_eq!(band.accept(-999.0), None);
        assert_eq!(band.accept(f64::NAN), None);
        assert_eq!(band.accept(f64::INFINITY), None);
    }
}
