//! Events that trigger phase transitions

/// Events that can change the motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionEvent {
    // Control API
    /// `play`, `start_loop`, or `go_to`
    Play,
    /// `pause` with a positive delay
    PauseTimed,
    /// `pause` without a delay
    PauseIndefinite,
    /// `stop`
    Stop,

    // Tick-driven
    /// Timed pause expired
    Resume,
    /// Last leg of a non-looping motion completed
    Finish,
    /// Loop cycle completed, idling before the next one
    LoopWait,
}
