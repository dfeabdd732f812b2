//! Linear interpolation with a per-tick angular cap
//!
//! A leg from `previous` to `current` is split into `total` increments so
//! that no single tick moves the servo more than `max_increment_degrees`.
//! All math is integer; there is no accumulated rounding because every
//! intermediate position is computed from the leg endpoints directly.

use crate::traits::Position;

/// Number of ticks needed to cover a leg without exceeding the cap
///
/// Always at least 1, so a zero-length leg still takes one tick and
/// completion bookkeeping stays uniform. A cap of 0 is treated as 1.
pub fn increments(previous: Position, current: Position, max_increment_degrees: u8) -> u16 {
    let distance = u16::from(previous.abs_diff(current));
    let cap = u16::from(max_increment_degrees.max(1));

    distance.div_ceil(cap).max(1)
}

/// Position after `increment` of `total` ticks along a leg
///
/// The offset from `previous` is floored, so intermediate positions round
/// toward lower angles in both directions. The final increment lands on
/// `current` exactly.
///
/// # Arguments
/// - `total`: Increments in the leg (0 is treated as 1)
/// - `increment`: 1-based progress, clamped to `total`
pub fn position(previous: Position, current: Position, total: u16, increment: u16) -> Position {
    let total = total.max(1);
    let increment = increment.min(total);

    let delta = i32::from(current) - i32::from(previous);
    let offset = (delta * i32::from(increment)).div_euclid(i32::from(total));

    // offset lies between 0 and delta, so the sum stays within the endpoints
    (i32::from(previous) + offset) as Position
}

/// Largest single-tick change over a whole leg
///
/// Floored steps differ by at most one degree from each other, so the
/// largest is the distance divided by `total`, rounded up.
pub fn max_step_delta(previous: Position, current: Position, total: u16) -> u8 {
    let distance = u16::from(previous.abs_diff(current));
    distance.div_ceil(total.max(1)) as u8
}
