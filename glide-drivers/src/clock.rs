//! Millisecond clock sources

use core::cell::Cell;

use glide_core::timing::Millis;
use glide_core::traits::Clock;

/// Clock advanced by hand
///
/// For host simulations and tests, or for boards where the caller already
/// tracks time and only needs to hand it to the sequencer.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    /// Create a clock reading `start`
    pub const fn new(start: u32) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to `ms`
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    /// Move forward by `ms`, wrapping at the counter range
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis::from_raw(self.now.get())
    }
}

/// Clock backed by the embassy time driver
///
/// Truncates the 64-bit tick count to the wrapping 32-bit millisecond
/// counter the sequencer works with.
#[cfg(feature = "embassy")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy")]
impl Clock for EmbassyClock {
    fn now(&self) -> Millis {
        Millis::from_raw(embassy_time::Instant::now().as_millis() as u32)
    }
}
