//! Velocity profile parameters.

use serde::Deserialize;

use crate::error::ConfigError;

/// Step cadence limits and ramp lengths for one motor.
///
/// Delays are full step periods in microseconds; the sequencer splits each
/// period into equal high and low halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampParameters {
    /// Steps spent accelerating from `max_delay_us` to `min_delay_us`.
    pub accel_steps: u32,

    /// Steps spent decelerating back to `max_delay_us`.
    pub decel_steps: u32,

    /// Longest step period (slowest cadence).
    pub max_delay_us: u32,

    /// Shortest step period (fastest cadence).
    pub min_delay_us: u32,
}

impl RampParameters {
    /// Create ramp parameters without validating them.
    pub const fn new(accel_steps: u32, decel_steps: u32, max_delay_us: u32, min_delay_us: u32) -> Self {
        Self {
            accel_steps,
            decel_steps,
            max_delay_us,
            min_delay_us,
        }
    }

    /// Combined length of both ramps.
    #[inline]
    pub fn ramp_steps(&self) -> u64 {
        self.accel_steps as u64 + self.decel_steps as u64
    }

    /// Half the delay span, the cosine amplitude.
    #[inline]
    pub fn delay_magnitude(&self) -> f64 {
        (self.max_delay_us as f64 - self.min_delay_us as f64) / 2.0
    }

    /// Midpoint of the delay span.
    #[inline]
    pub fn delay_offset(&self) -> f64 {
        (self.max_delay_us as f64 + self.min_delay_us as f64) / 2.0
    }

    /// Check the delay range.
    ///
    /// # Errors
    ///
    /// Rejects a zero minimum delay and any range where `min >= max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_delay_us == 0 {
            return Err(ConfigError::ZeroMinDelay);
        }
        if self.min_delay_us >= self.max_delay_us {
            return Err(ConfigError::InvalidDelayRange {
                min_us: self.min_delay_us,
                max_us: self.max_delay_us,
            });
        }
        Ok(())
    }
}
