//! Servo driver trait
//!
//! This trait abstracts over absolute-position actuators (hobby servos
//! driven by PWM, smart servos on a serial bus, simulated outputs).

/// Angular position in whole degrees
///
/// The usable range is device-specific; typical hobby servos accept 0-180.
pub type Position = u8;

/// Errors that can occur with servo operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError {
    /// Driver could not bind to the output
    AttachFailed,
    /// Pin is not usable for servo output
    InvalidPin,
    /// PWM peripheral rejected the duty cycle
    Pwm,
    /// Position written before the driver was attached
    NotAttached,
}

/// Trait for absolute-position servo drivers
///
/// Implementations translate an angle into whatever the hardware needs
/// (pulse width, bus command). `read` returns the last commanded angle for
/// open-loop servos, or a measured angle where feedback exists.
pub trait ServoDriver {
    /// Bind the driver to an output pin
    fn attach(&mut self, pin: u8) -> Result<(), ServoError>;

    /// Release the output (stop holding position)
    fn detach(&mut self) -> Result<(), ServoError> {
        Ok(())
    }

    /// Check if the driver is bound to an output
    fn is_attached(&self) -> bool;

    /// Get the current position
    fn read(&self) -> Position;

    /// Command an absolute position
    fn write(&mut self, position: Position) -> Result<(), ServoError>;
}

impl<T: ServoDriver + ?Sized> ServoDriver for &mut T {
    fn attach(&mut self, pin: u8) -> Result<(), ServoError> {
        (**self).attach(pin)
    }

    fn detach(&mut self) -> Result<(), ServoError> {
        (**self).detach()
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn read(&self) -> Position {
        (**self).read()
    }

    fn write(&mut self, position: Position) -> Result<(), ServoError> {
        (**self).write(position)
    }
}
