//! Tick-driven motion scheduler
//!
//! Plays the step queue back one tick at a time. The caller polls
//! [`MotionScheduler::update`] as often as it likes; the timing gate
//! throttles real work to one tick per `increment_delay_ms`, and each tick
//! does a constant amount of work with no allocation.
//!
//! # Usage
//!
//! ```ignore
//! let mut seq = MotionScheduler::new(servo, MotionConfig::default());
//! seq.begin(SERVO_PIN)?;
//! seq.extend(&[30, 90, 150])?;
//! seq.start_loop(DEFAULT_LOOP_DELAY_MS)?;
//!
//! loop {
//!     seq.poll(&clock)?;
//!     // other control-loop work
//! }
//! ```

use crate::config::{MotionConfig, DEFAULT_LOOP_DELAY_MS};
use crate::error::{CommandError, Error};
use crate::motion::{increments, max_step_delta, position};
use crate::observer::{MotionObserver, NoopObserver, Transition};
use crate::queue::StepQueue;
use crate::state::{MotionEvent, MotionPhase};
use crate::timing::{Millis, TimingGate, MAX_DELAY_MS};
use crate::traits::{Clock, Position, ServoDriver};

use super::progress::{Cursor, LegProgress, Progress};

/// Sequencer for a single servo
///
/// Owns the servo driver, the step queue, and all progress and timing
/// state. Not reentrant: control calls and `update` must come from the
/// same execution context, which `&mut self` enforces.
#[derive(Debug)]
pub struct MotionScheduler<S, O = NoopObserver> {
    /// Servo output
    driver: S,
    /// Transition hook
    observer: O,
    /// Set once `begin` (or the driver itself) has attached the output
    attached: bool,
    /// Target positions
    queue: StepQueue,
    /// Leg interpolation state
    progress: Progress,
    /// Tick and resume timestamps
    gate: TimingGate,
    /// Current phase
    phase: MotionPhase,
    /// Replay the queue when it runs out
    looping: bool,
    /// Idle gap between loop cycles
    loop_delay_ms: u32,
    /// Baseline motion settings
    config: MotionConfig,
    /// Settings for the motion in progress (differs only during `go_to_with`)
    active: MotionConfig,
}

impl<S: ServoDriver> MotionScheduler<S> {
    /// Create a scheduler without an observer
    pub fn new(driver: S, config: MotionConfig) -> Self {
        Self::with_observer(driver, config, NoopObserver)
    }
}

impl<S: ServoDriver, O: MotionObserver> MotionScheduler<S, O> {
    /// Create a scheduler that reports transitions to `observer`
    pub fn with_observer(driver: S, config: MotionConfig, observer: O) -> Self {
        let attached = driver.is_attached();
        Self {
            driver,
            observer,
            attached,
            queue: StepQueue::new(),
            progress: Progress::default(),
            gate: TimingGate::new(),
            phase: MotionPhase::Idle,
            looping: false,
            loop_delay_ms: DEFAULT_LOOP_DELAY_MS,
            config,
            active: config,
        }
    }

    /// Attach the servo output
    ///
    /// Motion commands are refused until this succeeds.
    pub fn begin(&mut self, pin: u8) -> Result<(), Error> {
        self.driver.attach(pin)?;
        self.attached = true;
        Ok(())
    }

    /// Stop any motion and release the servo output
    pub fn end(&mut self) -> Result<(), Error> {
        self.stop()?;
        self.driver.detach()?;
        self.attached = false;
        Ok(())
    }

    /// Live servo position
    pub fn position(&self) -> Position {
        self.driver.read()
    }

    // ------------------------------------------------------------------
    // Tick processing
    // ------------------------------------------------------------------

    /// Advance the sequence if a tick is due at `now`
    ///
    /// Call on every pass of the control loop. Returns the position written
    /// this call, or `None` when no tick was due or nothing is running.
    /// A servo write failure is returned without advancing progress, so the
    /// same increment is retried on the next tick.
    pub fn update(&mut self, now: Millis) -> Result<Option<Position>, Error> {
        if self.phase == MotionPhase::PausedTimed && self.gate.take_resume_due(now) {
            self.apply(MotionEvent::Resume);
            self.observer.on_transition(Transition::Resumed);
        }

        if !self.gate.is_due(now) {
            return Ok(None);
        }

        // The gate re-arms on every due tick, running or not
        self.gate.schedule_next(now, self.active.increment_delay_ms);

        if !self.phase.is_running() {
            return Ok(None);
        }

        self.tick(now)
    }

    /// [`update`](Self::update) with the time taken from `clock`
    pub fn poll<C: Clock + ?Sized>(&mut self, clock: &C) -> Result<Option<Position>, Error> {
        self.update(clock.now())
    }

    /// One due tick while running
    fn tick(&mut self, now: Millis) -> Result<Option<Position>, Error> {
        if !self.progress.is_started() {
            let Some(first) = self.queue.get(0) else {
                self.finish();
                return Ok(None);
            };

            let from = self.driver.read();
            self.progress.start_run(from, first);
            self.observer.on_transition(Transition::SequenceStarted {
                from,
                steps: self.queue.len() as u8,
            });
        }

        let leg = match self.progress.leg {
            Some(leg) => leg,
            None => self.size_leg(),
        };

        let target = position(
            self.progress.previous,
            self.progress.current,
            leg.total(),
            leg.increment(),
        );
        self.driver.write(target)?;

        if leg.is_complete() {
            self.complete_leg(now);
        } else {
            self.progress.leg = Some(leg.advanced());
        }

        Ok(Some(target))
    }

    /// Compute the tick count for the current leg
    fn size_leg(&mut self) -> LegProgress {
        let Progress {
            previous, current, ..
        } = self.progress;

        let leg = LegProgress::new(increments(
            previous,
            current,
            self.active.max_increment_degrees,
        ));
        self.progress.leg = Some(leg);
        self.observer.on_transition(Transition::LegStarted {
            from: previous,
            to: current,
            increments: leg.total(),
            max_step: max_step_delta(previous, current, leg.total()),
        });

        leg
    }

    /// Handle the final increment of a leg
    fn complete_leg(&mut self, now: Millis) {
        let index = match self.progress.cursor {
            Cursor::At(index) => Some(index),
            Cursor::Direct | Cursor::NotStarted => None,
        };

        self.progress.leg = None;
        self.observer.on_transition(Transition::LegCompleted {
            position: self.progress.current,
            index: index.map(|i| i as u8),
        });

        // A direct leg has no successor in the queue
        let next = index
            .map(|i| i + 1)
            .and_then(|i| self.queue.get(i).map(|step| (i, step)));

        match next {
            Some((index, step)) => self.progress.next_leg(index, step),
            None if self.looping => self.restart_loop(now),
            None => self.finish(),
        }
    }

    /// Queue exhausted while looping: start over after the loop delay
    fn restart_loop(&mut self, now: Millis) {
        self.progress.reset();
        self.active = self.config;
        self.observer.on_transition(Transition::LoopRestarted {
            delay_ms: self.loop_delay_ms,
        });

        if self.loop_delay_ms > 0 {
            let resume_at = self.gate.schedule_resume(now, self.loop_delay_ms);
            self.apply(MotionEvent::LoopWait);
            self.observer.on_transition(Transition::Paused {
                resume_at: Some(resume_at),
            });
        }
    }

    /// Non-looping motion complete
    fn finish(&mut self) {
        self.looping = false;
        self.progress.reset();
        self.gate.cancel_resume();
        self.active = self.config;
        self.apply(MotionEvent::Finish);
        self.observer.on_transition(Transition::Done);
    }

    fn apply(&mut self, event: MotionEvent) {
        self.phase = self.phase.transition(event);
    }

    // ------------------------------------------------------------------
    // Control API
    // ------------------------------------------------------------------

    /// Start or resume playback
    ///
    /// Picks up wherever the sequence left off: mid-leg after a pause, or
    /// from the live position after `stop` or completion.
    pub fn play(&mut self) -> Result<(), Error> {
        self.ensure_attached()?;
        if self.phase.is_running() {
            return Ok(());
        }
        self.ensure_playable()?;

        self.resume_motion();
        Ok(())
    }

    /// Play the queue repeatedly with `loop_delay_ms` idle between cycles
    ///
    /// `loop_delay_ms` must not exceed [`MAX_DELAY_MS`].
    pub fn start_loop(&mut self, loop_delay_ms: u32) -> Result<(), Error> {
        self.ensure_attached()?;
        self.ensure_playable()?;
        ensure_delay(loop_delay_ms)?;

        self.looping = true;
        self.loop_delay_ms = loop_delay_ms;
        if !self.phase.is_running() {
            self.resume_motion();
        }
        Ok(())
    }

    /// Halt and reset progress; queued steps are kept for replay
    pub fn stop(&mut self) -> Result<(), Error> {
        self.ensure_attached()?;

        self.looping = false;
        self.progress.reset();
        self.gate.reset();
        self.active = self.config;
        self.apply(MotionEvent::Stop);
        self.observer.on_transition(Transition::Stopped);
        Ok(())
    }

    /// Pause playback
    ///
    /// With a positive `delay_ms` playback resumes by itself once `now +
    /// delay_ms` is reached; otherwise it waits for [`play`](Self::play).
    /// From idle, a timed pause acts as a delayed start. Refused when there
    /// is nothing to play, or when `delay_ms` exceeds [`MAX_DELAY_MS`].
    pub fn pause(&mut self, now: Millis, delay_ms: Option<u32>) -> Result<(), Error> {
        self.ensure_attached()?;
        self.ensure_playable()?;
        if let Some(delay) = delay_ms {
            ensure_delay(delay)?;
        }

        let resume_at = match delay_ms {
            Some(delay) if delay > 0 => {
                let at = self.gate.schedule_resume(now, delay);
                self.apply(MotionEvent::PauseTimed);
                Some(at)
            }
            _ => {
                self.gate.cancel_resume();
                self.apply(MotionEvent::PauseIndefinite);
                None
            }
        };

        self.observer.on_transition(Transition::Paused { resume_at });
        Ok(())
    }

    /// Move straight to `target` with the baseline settings
    pub fn go_to(&mut self, target: Position) -> Result<(), Error> {
        self.go_to_with(target, self.config)
    }

    /// Move straight to `target`, bypassing the queue
    ///
    /// Only accepted while not running. The move starts from the live
    /// position, is always the last leg, and uses `config` until it
    /// finishes or is stopped. Any paused sequence progress is discarded.
    pub fn go_to_with(&mut self, target: Position, config: MotionConfig) -> Result<(), Error> {
        self.ensure_attached()?;
        if self.phase.is_running() {
            return Err(CommandError::Busy.into());
        }
        config.validate()?;

        let from = self.driver.read();
        let total = increments(from, target, config.max_increment_degrees);

        self.active = config;
        self.looping = false;
        self.progress.start_direct(from, target, total);
        self.gate.cancel_resume();
        self.observer.on_transition(Transition::LegStarted {
            from,
            to: target,
            increments: total,
            max_step: max_step_delta(from, target, total),
        });
        self.apply(MotionEvent::Play);
        Ok(())
    }

    /// Queue a step
    pub fn add(&mut self, step: Position) -> Result<(), Error> {
        self.ensure_editable()?;
        self.queue.add(step)
    }

    /// Queue several steps, all or nothing
    pub fn extend(&mut self, steps: &[Position]) -> Result<(), Error> {
        self.ensure_editable()?;
        self.queue.extend_from_slice(steps)
    }

    /// Remove all queued steps
    pub fn clear(&mut self) -> Result<(), Error> {
        self.ensure_editable()?;
        self.queue.clear();
        Ok(())
    }

    /// Replace the baseline motion settings
    ///
    /// Takes effect on the next tick for queue playback (a leg already
    /// sized keeps its increment count). A `go_to_with` move in progress
    /// keeps its own settings.
    pub fn set_config(&mut self, config: MotionConfig) -> Result<(), Error> {
        config.validate()?;

        self.config = config;
        if self.progress.cursor != Cursor::Direct {
            self.active = config;
        }
        Ok(())
    }

    fn ensure_attached(&self) -> Result<(), Error> {
        if self.attached {
            Ok(())
        } else {
            Err(CommandError::NotAttached.into())
        }
    }

    fn ensure_playable(&self) -> Result<(), Error> {
        if self.progress.is_started() || !self.queue.is_empty() {
            Ok(())
        } else {
            Err(CommandError::EmptyQueue.into())
        }
    }

    fn ensure_editable(&self) -> Result<(), Error> {
        if self.phase.accepts_queue_edits() {
            Ok(())
        } else {
            Err(CommandError::Busy.into())
        }
    }

    fn resume_motion(&mut self) {
        let was_paused = self.phase.is_paused();

        self.gate.cancel_resume();
        self.apply(MotionEvent::Play);
        if was_paused {
            self.observer.on_transition(Transition::Resumed);
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current phase
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Check if ticks are moving the servo
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    /// Check if the queue replays when exhausted
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Idle gap between loop cycles
    pub fn loop_delay_ms(&self) -> u32 {
        self.loop_delay_ms
    }

    /// Check if `begin` has attached the servo
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Queued steps
    pub fn queue(&self) -> &StepQueue {
        &self.queue
    }

    /// Leg interpolation state
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Tick and resume timestamps
    pub fn timing(&self) -> &TimingGate {
        &self.gate
    }

    /// Baseline motion settings
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Settings for the motion in progress
    pub fn active_config(&self) -> &MotionConfig {
        &self.active
    }

    /// Servo driver
    pub fn driver(&self) -> &S {
        &self.driver
    }

    /// Mutable servo driver
    pub fn driver_mut(&mut self) -> &mut S {
        &mut self.driver
    }

    /// Transition observer
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable transition observer
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Release the driver and observer
    pub fn into_parts(self) -> (S, O) {
        (self.driver, self.observer)
    }
}

fn ensure_delay(delay_ms: u32) -> Result<(), Error> {
    if delay_ms <= MAX_DELAY_MS {
        Ok(())
    } else {
        Err(CommandError::DelayOutOfRange.into())
    }
}
