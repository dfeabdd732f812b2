//! Fixed-capacity step queue
//!
//! Holds the target positions for a sequence. Storage is a
//! `heapless::Vec`, so a full queue refuses new steps instead of writing
//! past its end.

use heapless::Vec;

use crate::error::Error;
use crate::traits::Position;

/// Maximum steps per sequence
pub const MAX_STEPS: usize = 25;

/// Ordered list of target positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepQueue {
    steps: Vec<Position, MAX_STEPS>,
}

impl StepQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step
    ///
    /// Fails with [`Error::CapacityExceeded`] when full; the queue is left
    /// unchanged.
    pub fn add(&mut self, step: Position) -> Result<(), Error> {
        self.steps.push(step).map_err(|_| Error::CapacityExceeded)
    }

    /// Append several steps, all or nothing
    pub fn extend_from_slice(&mut self, steps: &[Position]) -> Result<(), Error> {
        self.steps
            .extend_from_slice(steps)
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Remove all steps
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Get the step at `index`
    pub fn get(&self, index: usize) -> Option<Position> {
        self.steps.get(index).copied()
    }

    /// Number of queued steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if no steps are queued
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check if the queue is at capacity
    pub fn is_full(&self) -> bool {
        self.steps.is_full()
    }

    /// Maximum number of steps
    pub const fn capacity(&self) -> usize {
        MAX_STEPS
    }

    /// Iterate over queued steps in playback order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.steps.iter().copied()
    }

    /// Queued steps as a slice
    pub fn as_slice(&self) -> &[Position] {
        &self.steps
    }
}
