//! Motion state machine
//!
//! The phase is explicit, finite, and deterministic; the scheduler only
//! changes it by feeding events through [`MotionPhase::transition`].

pub mod events;
pub mod machine;

pub use events::MotionEvent;
pub use machine::MotionPhase;
