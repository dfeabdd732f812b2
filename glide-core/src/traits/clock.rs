//! Millisecond clock trait

use crate::timing::Millis;

/// Monotonic millisecond time source
///
/// The counter is allowed to wrap at `u32::MAX`; all comparisons made by
/// the sequencer go through [`Millis`] and stay correct across the wrap.
pub trait Clock {
    /// Current time
    fn now(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Millis {
        (**self).now()
    }
}
