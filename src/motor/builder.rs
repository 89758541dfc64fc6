//! Builder pattern for StepperMotor.

use embedded_hal::delay::DelayNs;

use crate::config::units::MicrostepMode;
use crate::config::{validate_motor, MotorConfig, PinMap, RampParameters, SystemConfig};
use crate::error::{ConfigError, Error, Result};

use super::driver::StepperMotor;
use super::port::OutputPort;
use super::state::Unconfigured;

/// Builder for creating StepperMotor instances.
pub struct StepperMotorBuilder<PORT, DELAY>
where
    PORT: OutputPort,
    DELAY: DelayNs,
{
    port: Option<PORT>,
    delay: Option<DELAY>,
    name: Option<heapless::String<32>>,
    pins: Option<PinMap>,
    ramp: Option<RampParameters>,
    microsteps: MicrostepMode,
    enable_on_init: bool,
    invert_direction: bool,
    invert_position: bool,
}

impl<PORT, DELAY> StepperMotor<PORT, DELAY, Unconfigured>
where
    PORT: OutputPort,
    DELAY: DelayNs,
{
    /// Start building a motor.
    pub fn builder() -> StepperMotorBuilder<PORT, DELAY> {
        StepperMotorBuilder::new()
    }
}

impl<PORT, DELAY> Default for StepperMotorBuilder<PORT, DELAY>
where
    PORT: OutputPort,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<PORT, DELAY> StepperMotorBuilder<PORT, DELAY>
where
    PORT: OutputPort,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            port: None,
            delay: None,
            name: None,
            pins: None,
            ramp: None,
            microsteps: MicrostepMode::Full,
            enable_on_init: false,
            invert_direction: false,
            invert_position: false,
        }
    }

    /// Set the output port.
    pub fn port(mut self, port: PORT) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set the pin assignment.
    pub fn pins(mut self, pins: PinMap) -> Self {
        self.pins = Some(pins);
        self
    }

    /// Set the ramp parameters.
    pub fn ramp(mut self, ramp: RampParameters) -> Self {
        self.ramp = Some(ramp);
        self
    }

    /// Set the microstep mode used by `init_from_config`.
    pub fn microsteps(mut self, mode: MicrostepMode) -> Self {
        self.microsteps = mode;
        self
    }

    /// Leave the driver enabled after `init_from_config`.
    pub fn enable_on_init(mut self, enable: bool) -> Self {
        self.enable_on_init = enable;
        self
    }

    /// Set direction pin inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Count forward steps as negative position.
    pub fn invert_position(mut self, invert: bool) -> Self {
        self.invert_position = invert;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.pins = Some(config.pins);
        self.ramp = Some(config.ramp);
        self.microsteps = config.microsteps;
        self.enable_on_init = config.enable_on_init;
        self.invert_direction = config.invert_direction;
        self.invert_position = config.invert_position;
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                heapless::String::try_from(motor_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the StepperMotor.
    ///
    /// The motor still needs [`StepperMotor::init`] before it can move.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the resulting
    /// configuration fails validation.
    pub fn build(self) -> Result<StepperMotor<PORT, DELAY, Unconfigured>> {
        let port = self.port.ok_or(ConfigError::MissingField("port"))?;
        let delay = self.delay.ok_or(ConfigError::MissingField("delay"))?;
        let pins = self.pins.ok_or(ConfigError::MissingField("pins"))?;
        let ramp = self.ramp.ok_or(ConfigError::MissingField("ramp"))?;

        let config = MotorConfig {
            name: self.name.unwrap_or_else(|| {
                let mut name = heapless::String::new();
                let _ = name.push_str("motor");
                name
            }),
            pins,
            ramp,
            microsteps: self.microsteps,
            enable_on_init: self.enable_on_init,
            invert_direction: self.invert_direction,
            invert_position: self.invert_position,
        };
        validate_motor(&config)?;

        Ok(StepperMotor::new(port, delay, config))
    }
}
