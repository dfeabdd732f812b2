//! Tick timing
//!
//! Decides when a tick is due and when a paused sequence resumes. All
//! timing is sampled from the caller-supplied clock value; nothing here
//! waits or blocks.

pub mod gate;
pub mod millis;

pub use gate::TimingGate;
pub use millis::{Millis, MAX_DELAY_MS};
