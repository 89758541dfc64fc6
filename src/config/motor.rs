//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::pins::PinMap;
use super::ramp::RampParameters;
use super::units::MicrostepMode;

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Driver pin assignment.
    pub pins: PinMap,

    /// Velocity profile parameters.
    pub ramp: RampParameters,

    /// Microstep divisor applied at initialization (1, 2, 4, 8, 16, 32).
    #[serde(default)]
    pub microsteps: MicrostepMode,

    /// Leave the driver enabled after initialization.
    #[serde(default)]
    pub enable_on_init: bool,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Count forward steps as negative position.
    #[serde(default)]
    pub invert_position: bool,
}

impl MotorConfig {
    /// Create a configuration with default flags.
    pub fn new(name: &str, pins: PinMap, ramp: RampParameters) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            pins,
            ramp,
            microsteps: MicrostepMode::default(),
            enable_on_init: false,
            invert_direction: false,
            invert_position: false,
        }
    }
}
