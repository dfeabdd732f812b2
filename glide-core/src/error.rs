//! Caller-facing error conditions
//!
//! None of these are fatal: a rejected command leaves the scheduler exactly
//! as it was.

use core::fmt;

use crate::traits::ServoError;

/// Reasons a control command is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// A motion is in progress
    Busy,
    /// `begin` has not attached the servo yet
    NotAttached,
    /// Nothing queued and no leg pending
    EmptyQueue,
    /// Configuration values out of range
    InvalidConfig,
    /// Delay too long to compare against the wrapping clock
    DelayOutOfRange,
}

/// Sequencer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Step queue is full
    CapacityExceeded,
    /// Command not valid in the current state
    InvalidCommand(CommandError),
    /// Servo driver failure
    Servo(ServoError),
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::InvalidCommand(e)
    }
}

impl From<ServoError> for Error {
    fn from(e: ServoError) -> Self {
        Error::Servo(e)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CommandError::Busy => "motion in progress",
            CommandError::NotAttached => "servo not attached",
            CommandError::EmptyQueue => "no steps queued",
            CommandError::InvalidConfig => "invalid motion configuration",
            CommandError::DelayOutOfRange => "delay out of range",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for ServoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ServoError::AttachFailed => "attach failed",
            ServoError::InvalidPin => "invalid servo pin",
            ServoError::Pwm => "pwm error",
            ServoError::NotAttached => "servo not attached",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded => f.write_str("step queue full"),
            Error::InvalidCommand(e) => write!(f, "invalid command: {}", e),
            Error::Servo(e) => write!(f, "servo: {}", e),
        }
    }
}
