//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in glide-core:
//!
//! - Hobby servo on any `embedded-hal` PWM channel
//! - Millisecond clocks (manual for hosts and tests, embassy-time on targets)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod servo;

pub use clock::ManualClock;
#[cfg(feature = "embassy")]
pub use clock::EmbassyClock;
pub use servo::{PulseRange, PwmServo};
