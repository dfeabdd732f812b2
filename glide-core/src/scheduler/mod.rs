//! Motion scheduler
//!
//! Ties the step queue, interpolator, and timing gate together: each due
//! tick advances progress through the current leg and writes the next
//! position to the servo.

pub mod executor;
pub mod progress;

pub use executor::MotionScheduler;
pub use progress::{Cursor, LegProgress, Progress};
