//! Transition observers
//!
//! The scheduler reports every notable transition (leg start/complete,
//! pause, resume, loop restart, stop, done) to a [`MotionObserver`]. The
//! default observer does nothing; with the `defmt` feature,
//! [`DefmtObserver`] logs each transition.

use crate::timing::Millis;
use crate::traits::Position;

/// Notable scheduler transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Queue playback began from the live servo position
    SequenceStarted {
        /// Live position captured at the start of the run
        from: Position,
        /// Steps in the queue
        steps: u8,
    },
    /// A new leg was sized
    LegStarted {
        /// Start of the leg
        from: Position,
        /// Target of the leg
        to: Position,
        /// Ticks the leg will take
        increments: u16,
        /// Largest change in any one tick (degrees)
        max_step: u8,
    },
    /// The servo reached a leg target
    LegCompleted {
        /// Position reached
        position: Position,
        /// Queue index of the step, `None` for a direct `go_to` leg
        index: Option<u8>,
    },
    /// Motion paused
    Paused {
        /// Auto-resume instant, `None` for an indefinite pause
        resume_at: Option<Millis>,
    },
    /// Motion resumed after a pause
    Resumed,
    /// A loop cycle finished and the queue will replay
    LoopRestarted {
        /// Idle gap before the next cycle
        delay_ms: u32,
    },
    /// Motion stopped by the caller
    Stopped,
    /// Non-looping motion finished
    Done,
}

/// Receiver for scheduler transitions
pub trait MotionObserver {
    /// Called synchronously from the control API or `update`
    fn on_transition(&mut self, transition: Transition);
}

impl<O: MotionObserver + ?Sized> MotionObserver for &mut O {
    fn on_transition(&mut self, transition: Transition) {
        (**self).on_transition(transition)
    }
}

/// Observer that ignores every transition
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MotionObserver for NoopObserver {
    fn on_transition(&mut self, _transition: Transition) {}
}

/// Observer that logs transitions over defmt
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtObserver;

#[cfg(feature = "defmt")]
impl MotionObserver for DefmtObserver {
    fn on_transition(&mut self, transition: Transition) {
        match transition {
            Transition::SequenceStarted { from, steps } => {
                defmt::info!("Play start from {} ({} steps)", from, steps);
            }
            Transition::LegStarted {
                from,
                to,
                increments,
                max_step,
            } => {
                defmt::debug!(
                    "Leg {} -> {} in {} increments (<= {}deg/tick)",
                    from,
                    to,
                    increments,
                    max_step
                );
            }
            Transition::LegCompleted { position, index } => {
                defmt::debug!("Reached {} (step {:?})", position, index);
            }
            Transition::Paused { resume_at } => {
                defmt::info!("Paused (resume at {:?})", resume_at);
            }
            Transition::Resumed => defmt::info!("Un-paused"),
            Transition::LoopRestarted { delay_ms } => {
                defmt::info!("Loop restart in {}ms", delay_ms);
            }
            Transition::Stopped => defmt::info!("Stopped"),
            Transition::Done => defmt::info!("Done"),
        }
    }
}
