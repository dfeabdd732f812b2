//! Hardware abstraction traits
//!
//! These traits define the interface between the sequencer and the
//! hardware-specific servo output and time source.

pub mod clock;
pub mod servo;

pub use clock::Clock;
pub use servo::{Position, ServoDriver, ServoError};
