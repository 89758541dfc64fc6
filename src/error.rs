//! Error types for stepper-ramp.
//!
//! Provides unified error handling across configuration, motor control, and motion planning.

use core::fmt;

use crate::config::PinId;
use crate::motion::RampKind;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-ramp operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
    /// Motion profile planning error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep divisor (must be 1, 2, 4, 8, 16 or 32)
    InvalidMicrosteps(u16),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// A builder field was never set
    MissingField(&'static str),
    /// Two motor roles share the same pin
    DuplicatePin(PinId),
    /// Minimum delay must be strictly below maximum delay
    InvalidDelayRange {
        /// Configured minimum delay (fastest cadence), microseconds
        min_us: u32,
        /// Configured maximum delay (slowest cadence), microseconds
        max_us: u32,
    },
    /// Minimum delay must be greater than zero
    ZeroMinDelay,
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
}

/// Motion profile planning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A ramp formula would divide by a zero-length phase
    ZeroLengthRamp(RampKind),
    /// Step index lies outside the phase it was evaluated in
    IndexOutOfRange {
        /// Requested index
        index: u32,
        /// Number of steps in the phase
        len: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32", v)
            }
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::DuplicatePin(pin) => {
                write!(f, "Pin {} is assigned to more than one motor line", pin.0)
            }
            ConfigError::InvalidDelayRange { min_us, max_us } => {
                write!(f, "Invalid delay range: min ({} us) must be < max ({} us)", min_us, max_us)
            }
            ConfigError::ZeroMinDelay => write!(f, "Minimum delay must be > 0"),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::ZeroLengthRamp(kind) => {
                write!(f, "Cannot evaluate {} ramp of zero length", kind.name())
            }
            MotionError::IndexOutOfRange { index, len } => {
                write!(f, "Step index {} outside phase of {} steps", index, len)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_delay_range() {
        let err = Error::from(ConfigError::InvalidDelayRange { min_us: 400, max_us: 200 });
        let msg = format!("{}", err);
        assert!(msg.contains("400"));
        assert!(msg.contains("200"));
    }

    #[test]
    fn test_display_zero_ramp() {
        let err = Error::from(MotionError::ZeroLengthRamp(RampKind::Acceleration));
        assert_eq!(
            format!("{}", err),
            "Motion error: Cannot evaluate acceleration ramp of zero length"
        );
    }
}
