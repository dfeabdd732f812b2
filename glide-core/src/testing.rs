//! Test doubles for the servo driver and observer

use crate::observer::{MotionObserver, Transition};
use crate::traits::{Position, ServoDriver, ServoError};

/// In-memory servo that records every write
#[derive(Debug, Default)]
pub struct MockServo {
    pub position: Position,
    pub pin: Option<u8>,
    pub writes: Vec<Position>,
    pub fail_attach: bool,
    pub fail_writes: bool,
}

impl MockServo {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl ServoDriver for MockServo {
    fn attach(&mut self, pin: u8) -> Result<(), ServoError> {
        if self.fail_attach {
            return Err(ServoError::AttachFailed);
        }
        self.pin = Some(pin);
        Ok(())
    }

    fn detach(&mut self) -> Result<(), ServoError> {
        self.pin = None;
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.pin.is_some()
    }

    fn read(&self) -> Position {
        self.position
    }

    fn write(&mut self, position: Position) -> Result<(), ServoError> {
        if self.fail_writes {
            return Err(ServoError::Pwm);
        }
        self.position = position;
        self.writes.push(position);
        Ok(())
    }
}

/// Observer that keeps every transition
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<Transition>,
}

impl RecordingObserver {
    pub fn count(&self, wanted: Transition) -> usize {
        self.events.iter().filter(|&&e| e == wanted).count()
    }
}

impl MotionObserver for RecordingObserver {
    fn on_transition(&mut self, transition: Transition) {
        self.events.push(transition);
    }
}
