//! Hobby servo on a PWM channel
//!
//! Standard hobby servos expect a 50 Hz frame whose high pulse encodes the
//! angle: `min_us` at 0 degrees up to `max_us` at `max_angle` degrees. This
//! driver converts angles to duty cycles for any `embedded-hal` channel
//! implementing [`SetDutyCycle`].
//!
//! The channel must already be configured for the servo frame rate (a
//! 20 ms period by default). The driver only sets the duty.
//!
//! # Usage
//!
//! ```ignore
//! let servo = PwmServo::new(pwm_channel, SERVO_PIN, PulseRange::default());
//! let mut seq = MotionScheduler::new(servo, MotionConfig::default());
//! seq.begin(SERVO_PIN)?;
//! ```

use embedded_hal::pwm::SetDutyCycle;
use glide_core::traits::{Position, ServoDriver, ServoError};

/// Angle to pulse-width mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRange {
    /// Pulse width at 0 degrees (us)
    pub min_us: u16,
    /// Pulse width at `max_angle` (us)
    pub max_us: u16,
    /// PWM frame period (us)
    pub period_us: u16,
    /// Largest commandable angle (degrees)
    pub max_angle: Position,
}

impl Default for PulseRange {
    /// SG90-style servo: 500-2500 us over 180 degrees at 50 Hz
    fn default() -> Self {
        Self {
            min_us: 500,
            max_us: 2500,
            period_us: 20_000,
            max_angle: 180,
        }
    }
}

impl PulseRange {
    /// Pulse width for `angle`, clamped to `max_angle`
    pub fn pulse_us(&self, angle: Position) -> u16 {
        if self.max_angle == 0 {
            return self.min_us;
        }

        let angle = angle.min(self.max_angle) as u32;
        let span = self.max_us.saturating_sub(self.min_us) as u32;
        (self.min_us as u32 + angle * span / self.max_angle as u32) as u16
    }
}

/// Servo driven by a single PWM channel
///
/// The channel is bound to one physical pin, so `attach` only accepts that
/// pin number. The last commanded angle stands in for the servo's real
/// position, which hobby servos cannot report.
pub struct PwmServo<P> {
    /// PWM output
    channel: P,
    /// Pin the channel drives
    pin: u8,
    /// Pulse mapping
    range: PulseRange,
    /// Output enabled
    attached: bool,
    /// Last commanded angle
    angle: Position,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Wrap a configured PWM channel
    ///
    /// The output stays off until `attach`. The initial angle is the middle
    /// of the range, which `attach` drives.
    pub fn new(channel: P, pin: u8, range: PulseRange) -> Self {
        Self {
            channel,
            pin,
            range,
            attached: false,
            angle: range.max_angle / 2,
        }
    }

    /// Start from a known angle instead of mid-range
    pub fn with_angle(mut self, angle: Position) -> Self {
        self.angle = angle.min(self.range.max_angle);
        self
    }

    /// Pulse mapping
    pub fn range(&self) -> &PulseRange {
        &self.range
    }

    /// Pin the channel drives
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Duty value for a pulse width on this channel
    pub fn duty_for(&self, pulse_us: u16) -> u16 {
        let period = self.range.period_us.max(1) as u32;
        let duty = pulse_us as u32 * self.channel.max_duty_cycle() as u32 / period;
        duty.min(self.channel.max_duty_cycle() as u32) as u16
    }

    /// Release the PWM channel
    pub fn into_inner(self) -> P {
        self.channel
    }

    fn drive(&mut self, angle: Position) -> Result<(), ServoError> {
        let duty = self.duty_for(self.range.pulse_us(angle));
        self.channel
            .set_duty_cycle(duty)
            .map_err(|_| ServoError::Pwm)
    }
}

impl<P: SetDutyCycle> ServoDriver for PwmServo<P> {
    fn attach(&mut self, pin: u8) -> Result<(), ServoError> {
        if pin != self.pin {
            return Err(ServoError::InvalidPin);
        }

        self.drive(self.angle)?;
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), ServoError> {
        self.channel
            .set_duty_cycle_fully_off()
            .map_err(|_| ServoError::Pwm)?;
        self.attached = false;
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn read(&self) -> Position {
        self.angle
    }

    fn write(&mut self, position: Position) -> Result<(), ServoError> {
        if !self.attached {
            return Err(ServoError::NotAttached);
        }

        let angle = position.min(self.range.max_angle);
        self.drive(angle)?;
        self.angle = angle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::{ErrorKind, ErrorType};
    use proptest::prelude::*;

    /// Channel with a 20000-count top so duty equals pulse width in us
    struct FakeChannel {
        duty: u16,
        fail: bool,
    }

    impl FakeChannel {
        fn new() -> Self {
            Self {
                duty: 0,
                fail: false,
            }
        }
    }

    impl ErrorType for FakeChannel {
        type Error = ErrorKind;
    }

    impl SetDutyCycle for FakeChannel {
        fn max_duty_cycle(&self) -> u16 {
            20_000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.duty = duty;
            Ok(())
        }
    }

    fn servo() -> PwmServo<FakeChannel> {
        PwmServo::new(FakeChannel::new(), 14, PulseRange::default())
    }

    #[test]
    fn test_pulse_mapping() {
        let range = PulseRange::default();
        assert_eq!(range.pulse_us(0), 500);
        assert_eq!(range.pulse_us(90), 1500);
        assert_eq!(range.pulse_us(180), 2500);
        // Clamped
        assert_eq!(range.pulse_us(255), 2500);
    }

    #[test]
    fn test_attach_drives_initial_angle() {
        let mut servo = servo();
        assert!(!servo.is_attached());
        assert_eq!(servo.read(), 90);

        servo.attach(14).unwrap();
        assert!(servo.is_attached());
        assert_eq!(servo.channel.duty, 1500);
    }

    #[test]
    fn test_attach_wrong_pin() {
        let mut servo = servo();
        assert_eq!(servo.attach(9), Err(ServoError::InvalidPin));
        assert!(!servo.is_attached());
    }

    #[test]
    fn test_write_requires_attach() {
        let mut servo = servo().with_angle(10);
        assert_eq!(servo.write(45), Err(ServoError::NotAttached));
        assert_eq!(servo.read(), 10);
    }

    #[test]
    fn test_write_sets_duty_and_position() {
        let mut servo = servo();
        servo.attach(14).unwrap();

        servo.write(45).unwrap();
        assert_eq!(servo.read(), 45);
        assert_eq!(servo.channel.duty, 1000);

        servo.write(200).unwrap();
        assert_eq!(servo.read(), 180);
        assert_eq!(servo.channel.duty, 2500);
    }

    #[test]
    fn test_pwm_failure_keeps_position() {
        let mut servo = servo().with_angle(30);
        servo.attach(14).unwrap();
        servo.channel.fail = true;

        assert_eq!(servo.write(60), Err(ServoError::Pwm));
        assert_eq!(servo.read(), 30);
    }

    #[test]
    fn test_detach_turns_output_off() {
        let mut servo = servo();
        servo.attach(14).unwrap();
        servo.detach().unwrap();

        assert!(!servo.is_attached());
        assert_eq!(servo.channel.duty, 0);
        assert_eq!(servo.into_inner().duty, 0);
    }

    proptest! {
        #[test]
        fn prop_pulse_within_range(angle in any::<u8>()) {
            let range = PulseRange::default();
            let pulse = range.pulse_us(angle);
            prop_assert!(pulse >= range.min_us && pulse <= range.max_us);
        }

        #[test]
        fn prop_pulse_monotonic(a in 0u8..=180, b in 0u8..=180) {
            let range = PulseRange::default();
            if a <= b {
                prop_assert!(range.pulse_us(a) <= range.pulse_us(b));
            }
        }
    }
}
