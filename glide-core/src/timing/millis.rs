//! Wrapping millisecond timestamps

/// Longest delay that still orders correctly against the wrapping counter
pub const MAX_DELAY_MS: u32 = i32::MAX as u32;

/// Millisecond timestamp from a wrapping `u32` counter
///
/// Not `Ord`: once the counter wraps, a numerically smaller
/// value can be later in time. Ordering is only meaningful between
/// instants less than 2^31 ms (~24.8 days) apart, which is what
/// [`Millis::since`] assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(u32);

impl Millis {
    /// Counter origin
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from a raw counter value
    pub const fn from_raw(ms: u32) -> Self {
        Self(ms)
    }

    /// Get the raw counter value
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Timestamp `ms` milliseconds later, wrapping at the counter range
    pub const fn wrapping_add_ms(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }

    /// Signed distance from `earlier` to `self` in milliseconds
    ///
    /// Negative when `self` is before `earlier`.
    pub const fn since(self, earlier: Millis) -> i32 {
        self.0.wrapping_sub(earlier.0) as i32
    }

    /// Check if `self` has reached `deadline`
    pub const fn is_at_or_after(self, deadline: Millis) -> bool {
        self.since(deadline) >= 0
    }
}

impl From<u32> for Millis {
    fn from(ms: u32) -> Self {
        Self(ms)
    }
}

impl From<Millis> for u32 {
    fn from(ms: Millis) -> Self {
        ms.0
    }
}
