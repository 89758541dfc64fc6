//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_ramp::load_config;
///
/// let config = load_config("motors.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(truncate(e.message(), 128)).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

/// Cut `s` to at most `max` bytes on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[motors.x_axis]
name = "X-Axis"
pins = { step = 2, dir = 3, m0 = 4, m1 = 5, m2 = 6, enable = 7 }
ramp = { accel_steps = 200, decel_steps = 150, max_delay_us = 3200, min_delay_us = 200 }
"#;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config(MINIMAL).unwrap();
        let motor = config.motor("x_axis").unwrap();
        assert_eq!(motor.ramp.accel_steps, 200);
        assert_eq!(motor.pins.enable.0, 7);
    }

    #[test]
    fn test_parse_rejects_invalid_ramp() {
        let toml = r#"
[motors.x_axis]
name = "X-Axis"
pins = { step = 2, dir = 3, m0 = 4, m1 = 5, m2 = 6, enable = 7 }
ramp = { accel_steps = 200, decel_steps = 150, max_delay_us = 100, min_delay_us = 200 }
"#;
        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::InvalidDelayRange { .. }))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_config("[motors.x_axis]\nname = 3\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/motors.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("abc", 8), "abc");
        assert_eq!(truncate("aé", 2), "a");
    }
}
