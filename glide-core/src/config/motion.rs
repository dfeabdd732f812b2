//! Motion configuration definitions

use crate::error::{CommandError, Error};
use crate::timing::MAX_DELAY_MS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default angular cap per tick (degrees)
pub const DEFAULT_MAX_INCREMENT_DEGREES: u8 = 2;

/// Default minimum time between ticks (ms)
pub const DEFAULT_INCREMENT_DELAY_MS: u32 = 20;

/// Default idle gap between loop cycles (ms)
pub const DEFAULT_LOOP_DELAY_MS: u32 = 100;

/// Default servo output pin
pub const DEFAULT_SERVO_PIN: u8 = 9;

/// Serialized config format version
pub const CONFIG_VERSION: u8 = 1;

/// Maximum serialized config size (binary)
pub const MAX_CONFIG_SIZE: usize = 32;

/// Per-motion speed settings
///
/// Perceived speed is `max_increment_degrees / increment_delay_ms`:
/// lowering the delay or raising the cap makes motion faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Largest angular change applied in one tick (degrees, >= 1)
    pub max_increment_degrees: u8,
    /// Minimum milliseconds between ticks
    pub increment_delay_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_increment_degrees: DEFAULT_MAX_INCREMENT_DEGREES,
            increment_delay_ms: DEFAULT_INCREMENT_DELAY_MS,
        }
    }
}

impl MotionConfig {
    /// Create a config from explicit values
    pub const fn new(max_increment_degrees: u8, increment_delay_ms: u32) -> Self {
        Self {
            max_increment_degrees,
            increment_delay_ms,
        }
    }

    /// Same config with a different angular cap
    pub const fn with_max_increment(mut self, degrees: u8) -> Self {
        self.max_increment_degrees = degrees;
        self
    }

    /// Same config with a different tick delay
    pub const fn with_increment_delay(mut self, delay_ms: u32) -> Self {
        self.increment_delay_ms = delay_ms;
        self
    }

    /// Check that the values are usable
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_increment_degrees == 0 || self.increment_delay_ms > MAX_DELAY_MS {
            return Err(CommandError::InvalidConfig.into());
        }
        Ok(())
    }
}

/// Complete sequencer setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequencerConfig {
    /// Servo output pin passed to `begin`
    pub pin: u8,
    /// Baseline motion settings
    pub motion: MotionConfig,
    /// Idle gap between loop cycles (ms)
    pub loop_delay_ms: u32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            pin: DEFAULT_SERVO_PIN,
            motion: MotionConfig::default(),
            loop_delay_ms: DEFAULT_LOOP_DELAY_MS,
        }
    }
}

impl SequencerConfig {
    /// Check that the values are usable
    pub fn validate(&self) -> Result<(), Error> {
        if self.loop_delay_ms > MAX_DELAY_MS {
            return Err(CommandError::InvalidConfig.into());
        }
        self.motion.validate()
    }
}

/// Config persistence errors
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Stored data was written by a different format version
    VersionMismatch,
    /// Stored values failed validation
    Invalid,
}

#[cfg(feature = "serde")]
impl SequencerConfig {
    /// Serialize into `buf` as a version byte followed by postcard data
    ///
    /// Returns the used prefix of `buf`.
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(&(CONFIG_VERSION, self), buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize and validate bytes produced by [`SequencerConfig::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let (version, config): (u8, SequencerConfig) =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

        if version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        config.validate().map_err(|_| ConfigError::Invalid)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MotionConfig::default();
        assert_eq!(config.max_increment_degrees, 2);
        assert_eq!(config.increment_delay_ms, 20);

        let setup = SequencerConfig::default();
        assert_eq!(setup.loop_delay_ms, 100);
        assert_eq!(setup.motion, config);
    }

    #[test]
    fn test_builders() {
        let config = MotionConfig::default()
            .with_max_increment(10)
            .with_increment_delay(5);
        assert_eq!(config, MotionConfig::new(10, 5));
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        assert_eq!(
            MotionConfig::new(0, 20).validate(),
            Err(Error::InvalidCommand(CommandError::InvalidConfig))
        );
        assert!(MotionConfig::new(1, 0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unorderable_delays() {
        let invalid = Err(Error::InvalidCommand(CommandError::InvalidConfig));

        assert!(MotionConfig::new(10, MAX_DELAY_MS).validate().is_ok());
        assert_eq!(MotionConfig::new(10, MAX_DELAY_MS + 1).validate(), invalid);
        assert_eq!(MotionConfig::new(10, 3_000_000_000).validate(), invalid);

        let setup = SequencerConfig {
            loop_delay_ms: u32::MAX,
            ..SequencerConfig::default()
        };
        assert_eq!(setup.validate(), invalid);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_persisted_config() {
        let config = SequencerConfig {
            pin: 3,
            motion: MotionConfig::new(5, 15),
            loop_delay_ms: 750,
        };

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let bytes = config.to_bytes(&mut buf).unwrap();
        assert_eq!(bytes[0], CONFIG_VERSION);
        assert_eq!(SequencerConfig::from_bytes(bytes), Ok(config));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_persisted_config_errors() {
        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let len = SequencerConfig::default().to_bytes(&mut buf).unwrap().len();

        buf[0] = CONFIG_VERSION + 1;
        assert_eq!(
            SequencerConfig::from_bytes(&buf[..len]),
            Err(ConfigError::VersionMismatch)
        );

        assert_eq!(
            SequencerConfig::from_bytes(&[]),
            Err(ConfigError::Deserialize)
        );

        let mut tiny = [0u8; 2];
        assert_eq!(
            SequencerConfig::default().to_bytes(&mut tiny).map(|b| b.len()),
            Err(ConfigError::Serialize)
        );
    }
}
