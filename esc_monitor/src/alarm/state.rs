//! Alarm flag set for one channel.

use bitflags::bitflags;

bitflags! {
    /// Active alarms of one channel.
    ///
    /// Invariant: `CRITICAL` is never set without `HIGH`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AlarmState: u8 {
        /// Temperature reached the high threshold and has not cooled below
        /// `high - hysteresis` since.
        const HIGH     = 0x01;
        /// Temperature reached the critical threshold and has not cooled
        /// below `critical - hysteresis` since.
        const CRITICAL = 0x02;
    }
}

impl AlarmState {
    /// Returns true if the HIGH alarm is active.
    #[inline]
    pub const fn high_active(&self) -> bool {
        self.contains(Self::HIGH)
    }

    /// Returns true if the CRITICAL alarm is active.
    #[inline]
    pub const fn critical_active(&self) -> bool {
        self.contains(Self::CRITICAL)
    }

    /// Returns true if the CRITICAL ⇒ HIGH invariant holds.
    #[inline]
    pub const fn is_consistent(&self) -> bool {
        !self.critical_active() || self.high_active()
    }
}

impl Default for AlarmState {
    fn default() -> Self {
        Self::empty()
    }
}
