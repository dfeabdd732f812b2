//! Sequence progress tracking

use crate::traits::Position;

/// Where playback is in the step queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cursor {
    /// No run started; the next tick captures the live position
    #[default]
    NotStarted,
    /// Approaching the queued step at this index
    At(usize),
    /// Single `go_to` leg outside the queue; always the last leg
    Direct,
}

/// Tick counter for the leg in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LegProgress {
    /// Ticks needed for the leg (>= 1)
    total: u16,
    /// 1-based tick about to be applied, in `[1, total]`
    increment: u16,
}

impl LegProgress {
    /// Start a leg of `total` ticks
    pub fn new(total: u16) -> Self {
        Self {
            total: total.max(1),
            increment: 1,
        }
    }

    /// Ticks needed for the leg
    pub fn total(&self) -> u16 {
        self.total
    }

    /// Current 1-based tick
    pub fn increment(&self) -> u16 {
        self.increment
    }

    /// Check if the current tick is the last one
    pub fn is_complete(&self) -> bool {
        self.increment >= self.total
    }

    /// Progress after one more tick
    pub fn advanced(self) -> Self {
        Self {
            increment: (self.increment + 1).min(self.total),
            ..self
        }
    }
}

/// Interpolation state between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progress {
    /// Position in the step queue
    pub cursor: Cursor,
    /// Start of the current leg
    pub previous: Position,
    /// Target of the current leg
    pub current: Position,
    /// Tick counter, `None` until the leg is sized
    pub leg: Option<LegProgress>,
}

impl Progress {
    /// Begin a queue run from the live position toward the first step
    pub fn start_run(&mut self, from: Position, first: Position) {
        self.cursor = Cursor::At(0);
        self.previous = from;
        self.current = first;
        self.leg = None;
    }

    /// Begin a direct leg that bypasses the queue
    pub fn start_direct(&mut self, from: Position, to: Position, total: u16) {
        self.cursor = Cursor::Direct;
        self.previous = from;
        self.current = to;
        self.leg = Some(LegProgress::new(total));
    }

    /// Move on to the queued step at `index`
    pub fn next_leg(&mut self, index: usize, target: Position) {
        self.cursor = Cursor::At(index);
        self.previous = self.current;
        self.current = target;
        self.leg = None;
    }

    /// Check if a run or direct leg is underway
    pub fn is_started(&self) -> bool {
        self.cursor != Cursor::NotStarted
    }

    /// Forget the run; positions are kept for inspection
    pub fn reset(&mut self) {
        self.cursor = Cursor::NotStarted;
        self.leg = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_counts_to_total() {
        let mut leg = LegProgress::new(3);
        assert_eq!(leg.increment(), 1);
        assert!(!leg.is_complete());

        leg = leg.advanced();
        leg = leg.advanced();
        assert_eq!(leg.increment(), 3);
        assert!(leg.is_complete());

        // Never runs past the end
        assert_eq!(leg.advanced().increment(), 3);
    }

    #[test]
    fn test_zero_length_leg() {
        let leg = LegProgress::new(0);
        assert_eq!(leg.total(), 1);
        assert!(leg.is_complete());
    }

    #[test]
    fn test_run_progression() {
        let mut progress = Progress::default();
        assert!(!progress.is_started());

        progress.start_run(0, 30);
        assert_eq!(progress.cursor, Cursor::At(0));
        assert_eq!((progress.previous, progress.current), (0, 30));

        progress.next_leg(1, 90);
        assert_eq!(progress.cursor, Cursor::At(1));
        assert_eq!((progress.previous, progress.current), (30, 90));
        assert_eq!(progress.leg, None);

        progress.reset();
        assert!(!progress.is_started());
    }

    #[test]
    fn test_direct_leg() {
        let mut progress = Progress::default();
        progress.start_direct(10, 70, 6);

        assert_eq!(progress.cursor, Cursor::Direct);
        assert_eq!(progress.leg, Some(LegProgress::new(6)));
        assert!(progress.is_started());
    }
}
