//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every motor:
/// - All six pins are distinct
/// - The delay range is non-empty (`0 < min < max`)
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, motor) in config.motors.iter() {
        validate_motor(motor)?;
    }

    Ok(())
}

/// Validate a single motor configuration.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    if let Some(pin) = config.pins.first_duplicate() {
        return Err(Error::Config(ConfigError::DuplicatePin(pin)));
    }

    config.ramp.validate()?;

    if config.ramp.accel_steps == 0 && config.ramp.decel_steps > 0 {
        // Short moves evaluate the envelope against the acceleration length,
        // so they will be refused at planning time.
        warn!("motor has a deceleration ramp but no acceleration ramp");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PinId, PinMap, RampParameters};

    fn motor(pins: PinMap, ramp: RampParameters) -> MotorConfig {
        MotorConfig::new("test", pins, ramp)
    }

    #[test]
    fn test_valid_motor() {
        let config = motor(PinMap::new(2, 3, 4, 5, 6, 7), RampParameters::new(200, 150, 3200, 200));
        assert!(validate_motor(&config).is_ok());
    }

    #[test]
    fn test_duplicate_pin() {
        let config = motor(PinMap::new(2, 3, 4, 5, 6, 2), RampParameters::new(200, 150, 3200, 200));
        assert_eq!(
            validate_motor(&config),
            Err(Error::Config(ConfigError::DuplicatePin(PinId(2))))
        );
    }

    #[test]
    fn test_inverted_delay_range() {
        let config = motor(PinMap::new(2, 3, 4, 5, 6, 7), RampParameters::new(200, 150, 200, 3200));
        assert!(matches!(
            validate_motor(&config),
            Err(Error::Config(ConfigError::InvalidDelayRange { .. }))
        ));
    }

    #[test]
    fn test_empty_config_is_valid() {
        assert!(validate_config(&SystemConfig::default()).is_ok());
    }
}
