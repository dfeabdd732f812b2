//! Board-agnostic core logic for the servo motion sequencer
//!
//! This crate contains everything that does not depend on a specific
//! servo or timer implementation:
//!
//! - Hardware abstraction traits (servo output, millisecond clock)
//! - Fixed-capacity step queue
//! - Interpolation math (per-tick angular cap)
//! - Timing gate with wraparound-safe timestamps
//! - Motion scheduler state machine
//! - Transition observers
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod motion;
pub mod observer;
pub mod queue;
pub mod scheduler;
pub mod state;
pub mod timing;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{CommandError, Error};
pub use scheduler::MotionScheduler;
pub use timing::Millis;
pub use traits::{Clock, Position, ServoDriver, ServoError};
