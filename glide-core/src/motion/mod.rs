//! Motion math
//!
//! Leg sizing and linear interpolation between two positions.

pub mod interpolator;

pub use interpolator::{increments, max_step_delta, position};
