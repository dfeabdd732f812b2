//! Configuration types
//!
//! Motion tuning and sequencer setup. With the `serde` feature these can
//! be stored as postcard binary data.

pub mod motion;

pub use motion::*;
