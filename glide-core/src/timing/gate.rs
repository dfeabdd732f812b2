//! Tick and resume gating
//!
//! The gate owns two timestamps: when the next tick may act, and when a
//! timed pause ends. `None` in either slot means "nothing scheduled", so
//! a counter value of 0 is an ordinary instant rather than a sentinel.

use super::{Millis, MAX_DELAY_MS};

/// Timing state for the motion scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingGate {
    /// Earliest instant at which the next tick may act
    next_update: Option<Millis>,
    /// Instant at which a timed pause ends
    resume_at: Option<Millis>,
}

impl TimingGate {
    /// Create a gate with nothing scheduled (first tick is due immediately)
    pub const fn new() -> Self {
        Self {
            next_update: None,
            resume_at: None,
        }
    }

    /// Check if a tick is due at `now`
    pub fn is_due(&self, now: Millis) -> bool {
        self.next_update
            .map_or(true, |next| now.is_at_or_after(next))
    }

    /// Schedule the next tick `delay_ms` after `now`
    ///
    /// Delays are capped at [`MAX_DELAY_MS`].
    pub fn schedule_next(&mut self, now: Millis, delay_ms: u32) {
        self.next_update = Some(now.wrapping_add_ms(delay_ms.min(MAX_DELAY_MS)));
    }

    /// Get the next tick instant, if one is scheduled
    pub fn next_update(&self) -> Option<Millis> {
        self.next_update
    }

    /// Schedule an auto-resume `delay_ms` after `now`
    ///
    /// Replaces any resume already pending. Delays are capped at
    /// [`MAX_DELAY_MS`]. Returns the resume instant.
    pub fn schedule_resume(&mut self, now: Millis, delay_ms: u32) -> Millis {
        let at = now.wrapping_add_ms(delay_ms.min(MAX_DELAY_MS));
        self.resume_at = Some(at);
        at
    }

    /// Drop any pending auto-resume
    pub fn cancel_resume(&mut self) {
        self.resume_at = None;
    }

    /// Get the pending auto-resume instant
    pub fn resume_at(&self) -> Option<Millis> {
        self.resume_at
    }

    /// Consume a pending resume if it is due at `now`
    ///
    /// Returns `true` exactly once per scheduled resume.
    pub fn take_resume_due(&mut self, now: Millis) -> bool {
        match self.resume_at {
            Some(at) if now.is_at_or_after(at) => {
                self.resume_at = None;
                true
            }
            _ => false,
        }
    }

    /// Clear both timestamps
    pub fn reset(&mut self) {
        self.next_update = None;
        self.resume_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_tick_is_due() {
        let gate = TimingGate::new();
        assert!(gate.is_due(Millis::ZERO));
        assert!(gate.is_due(Millis::from_raw(12345)));
    }

    #[test]
    fn test_schedule_next() {
        let mut gate = TimingGate::new();
        gate.schedule_next(Millis::from_raw(100), 20);

        assert!(!gate.is_due(Millis::from_raw(100)));
        assert!(!gate.is_due(Millis::from_raw(119)));
        assert!(gate.is_due(Millis::from_raw(120)));
        assert!(gate.is_due(Millis::from_raw(500)));
    }

    #[test]
    fn test_schedule_next_across_wrap() {
        let mut gate = TimingGate::new();
        let now = Millis::from_raw(u32::MAX - 5);
        gate.schedule_next(now, 20);

        // A direct `>=` on the raw counter would call this due immediately
        assert!(!gate.is_due(Millis::from_raw(u32::MAX)));
        assert!(!gate.is_due(Millis::from_raw(13)));
        assert!(gate.is_due(Millis::from_raw(14)));
    }

    #[test]
    fn test_resume_fires_once() {
        let mut gate = TimingGate::new();
        let at = gate.schedule_resume(Millis::from_raw(1000), 500);
        assert_eq!(at, Millis::from_raw(1500));

        assert!(!gate.take_resume_due(Millis::from_raw(1499)));
        assert!(gate.take_resume_due(Millis::from_raw(1500)));
        assert!(!gate.take_resume_due(Millis::from_raw(1501)));
        assert_eq!(gate.resume_at(), None);
    }

    #[test]
    fn test_resume_at_counter_zero() {
        let mut gate = TimingGate::new();
        gate.schedule_resume(Millis::from_raw(u32::MAX - 99), 100);

        assert_eq!(gate.resume_at(), Some(Millis::ZERO));
        assert!(!gate.take_resume_due(Millis::from_raw(u32::MAX)));
        assert!(gate.take_resume_due(Millis::ZERO));
    }

    #[test]
    fn test_cancel_and_reset() {
        let mut gate = TimingGate::new();
        gate.schedule_next(Millis::from_raw(0), 20);
        gate.schedule_resume(Millis::from_raw(0), 100);

        gate.cancel_resume();
        assert_eq!(gate.resume_at(), None);

        gate.reset();
        assert_eq!(gate, TimingGate::new());
    }

    #[test]
    fn test_oversized_delays_are_capped() {
        let mut gate = TimingGate::new();
        let now = Millis::from_raw(5);

        gate.schedule_next(now, u32::MAX);
        assert!(!gate.is_due(Millis::from_raw(6)));
        assert!(!gate.is_due(now.wrapping_add_ms(MAX_DELAY_MS - 1)));
        assert!(gate.is_due(now.wrapping_add_ms(MAX_DELAY_MS)));

        let at = gate.schedule_resume(now, 3_000_000_000);
        assert_eq!(at, now.wrapping_add_ms(MAX_DELAY_MS));
        assert!(!gate.take_resume_due(Millis::from_raw(6)));
    }

    proptest! {
        #[test]
        fn prop_not_due_before_delay(
            start in any::<u32>(),
            delay in 1u32..10_000,
            early in 0u32..10_000,
        ) {
            let mut gate = TimingGate::new();
            let now = Millis::from_raw(start);
            gate.schedule_next(now, delay);

            let before = now.wrapping_add_ms(early % delay);
            prop_assert!(!gate.is_due(before));
            prop_assert!(gate.is_due(now.wrapping_add_ms(delay)));
        }
    }
}
