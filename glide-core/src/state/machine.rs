//! Motion phase definition

use super::events::MotionEvent;

/// Scheduler phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Nothing started (or stopped); progress is reset
    #[default]
    Idle,
    /// Actively stepping on each due tick
    Running,
    /// Paused with a scheduled auto-resume
    PausedTimed,
    /// Paused until an explicit `play`
    PausedIndefinite,
    /// Non-looping motion finished
    Done,
}

impl MotionPhase {
    /// Check if ticks move the servo in this phase
    pub fn is_running(&self) -> bool {
        *self == MotionPhase::Running
    }

    /// Check if this is either pause phase
    pub fn is_paused(&self) -> bool {
        matches!(self, MotionPhase::PausedTimed | MotionPhase::PausedIndefinite)
    }

    /// Check if a motion is in progress (running or paused mid-way)
    pub fn is_active(&self) -> bool {
        self.is_running() || self.is_paused()
    }

    /// Check if the step queue may be edited
    pub fn accepts_queue_edits(&self) -> bool {
        !self.is_active()
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: MotionEvent) -> Self {
        use MotionEvent::*;
        use MotionPhase::*;

        match (self, event) {
            // Stop always returns to idle
            (_, Stop) => Idle,

            // Starting or resuming
            (Idle | Done | PausedTimed | PausedIndefinite, Play) => Running,

            // Pausing (a timed pause can also be a delayed start)
            (_, PauseTimed) => PausedTimed,
            (_, PauseIndefinite) => PausedIndefinite,

            // Timed pause expired
            (PausedTimed, Resume) => Running,

            // Running transitions
            (Running, Finish) => Done,
            (Running, LoopWait) => PausedTimed,

            // Default: stay in current phase
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_from_rest() {
        for phase in [MotionPhase::Idle, MotionPhase::Done] {
            assert_eq!(phase.transition(MotionEvent::Play), MotionPhase::Running);
        }
    }

    #[test]
    fn test_stop_from_any_phase() {
        let phases = [
            MotionPhase::Idle,
            MotionPhase::Running,
            MotionPhase::PausedTimed,
            MotionPhase::PausedIndefinite,
            MotionPhase::Done,
        ];

        for phase in phases {
            assert_eq!(phase.transition(MotionEvent::Stop), MotionPhase::Idle);
        }
    }

    #[test]
    fn test_pause_resume_flow() {
        let running = MotionPhase::Running;

        let timed = running.transition(MotionEvent::PauseTimed);
        assert_eq!(timed, MotionPhase::PausedTimed);
        assert_eq!(timed.transition(MotionEvent::Resume), MotionPhase::Running);

        let indefinite = running.transition(MotionEvent::PauseIndefinite);
        assert_eq!(indefinite, MotionPhase::PausedIndefinite);
        // Only an explicit play resumes an indefinite pause
        assert_eq!(
            indefinite.transition(MotionEvent::Resume),
            MotionPhase::PausedIndefinite
        );
        assert_eq!(indefinite.transition(MotionEvent::Play), MotionPhase::Running);
    }

    #[test]
    fn test_completion_flow() {
        let running = MotionPhase::Running;
        assert_eq!(running.transition(MotionEvent::Finish), MotionPhase::Done);
        assert_eq!(running.transition(MotionEvent::LoopWait), MotionPhase::PausedTimed);

        // Tick events are ignored outside of running
        assert_eq!(MotionPhase::Idle.transition(MotionEvent::Finish), MotionPhase::Idle);
        assert_eq!(MotionPhase::Done.transition(MotionEvent::Resume), MotionPhase::Done);
    }

    #[test]
    fn test_phase_queries() {
        assert!(MotionPhase::Running.is_running());
        assert!(MotionPhase::Running.is_active());
        assert!(MotionPhase::PausedTimed.is_paused());
        assert!(MotionPhase::PausedIndefinite.is_active());
        assert!(!MotionPhase::Done.is_active());
        assert!(MotionPhase::Idle.accepts_queue_edits());
        assert!(MotionPhase::Done.accepts_queue_edits());
        assert!(!MotionPhase::PausedIndefinite.accepts_queue_edits());
    }
}
