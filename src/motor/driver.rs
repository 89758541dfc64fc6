//! Stepper motor driver.
//!
//! Generic over an [`OutputPort`] and an embedded-hal 1.0 delay, with
//! type-state safety for initialization.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;

use crate::config::units::{MicrostepMode, Steps};
use crate::config::{MotorConfig, PinId, PinMap, RampParameters};
use crate::error::{Error, MotorError, Result};
use crate::motion::{
    AbortKind, AbortSignal, Direction, MotionExecutor, MotionProfile, MoveRegime,
};

use super::port::OutputPort;
use super::position::Position;
use super::state::{MotorState, Ready, StateName, Unconfigured};

/// Time given to the driver's current to settle after enabling and before
/// disabling, in milliseconds.
pub const SETTLE_MS: u32 = 100;

/// Enable line level that turns the driver on (active low).
const ENABLED_LEVEL: bool = false;

/// Outcome of [`StepperMotor::execute_move`].
///
/// An aborted move is not an error: it shows up as `completed < requested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveReport {
    /// Steps asked for.
    pub requested: u32,
    /// Steps actually pulsed.
    pub completed: u32,
    /// Abort flag that cut the move short, if any.
    pub aborted: Option<AbortKind>,
    /// Profile shape that was used.
    pub regime: MoveRegime,
    /// Position after the move.
    pub position: Steps,
}

impl MoveReport {
    /// Whether every requested step was pulsed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed == self.requested
    }
}

/// Stepper motor driver with type-state safety.
///
/// Generic over:
/// - `PORT`: Digital outputs for the six driver lines
/// - `DELAY`: Delay provider (must implement `DelayNs`)
/// - `STATE`: Type-state marker (defaults to `Ready`)
pub struct StepperMotor<PORT, DELAY, STATE = Ready>
where
    PORT: OutputPort,
    DELAY: DelayNs,
    STATE: MotorState,
{
    /// Output port driving step, dir, select and enable lines.
    port: PORT,

    /// Delay provider for step timing.
    delay: DELAY,

    /// Pins, ramp and flags.
    config: MotorConfig,

    /// Current absolute position.
    position: Position,

    /// Last level written to the enable line.
    enabled: bool,

    /// Microstep mode currently encoded on the select lines.
    microsteps: MicrostepMode,

    /// Type-state marker.
    _state: PhantomData<STATE>,
}

impl<PORT, DELAY, STATE> StepperMotor<PORT, DELAY, STATE>
where
    PORT: OutputPort,
    DELAY: DelayNs,
    STATE: MotorState + StateName,
{
    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.config.name.as_str()
    }

    /// Get the motor configuration.
    #[inline]
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Get the pin assignment.
    #[inline]
    pub fn pins(&self) -> &PinMap {
        &self.config.pins
    }

    /// Get the ramp parameters.
    #[inline]
    pub fn ramp(&self) -> &RampParameters {
        &self.config.ramp
    }

    /// Get current position in steps.
    #[inline]
    pub fn position(&self) -> Steps {
        self.position.steps()
    }

    /// Whether the enable line was last driven to the active level.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Borrow the output port.
    #[inline]
    pub fn port(&self) -> &PORT {
        &self.port
    }

    /// Get the current state name.
    #[inline]
    pub fn state_name(&self) -> &'static str {
        STATE::name()
    }

    /// Take the port and delay back.
    pub fn release(self) -> (PORT, DELAY) {
        (self.port, self.delay)
    }

    fn set_level(&mut self, pin: PinId, high: bool) -> Result<()> {
        self.port
            .set_level(pin, high)
            .map_err(|_| Error::Motor(MotorError::PinError))
    }

    fn drive_enable(&mut self, enabled: bool) -> Result<()> {
        let pin = self.config.pins.enable;
        self.set_level(pin, if enabled { ENABLED_LEVEL } else { !ENABLED_LEVEL })?;
        self.enabled = enabled;
        Ok(())
    }

    fn encode_microsteps(&mut self, mode: MicrostepMode) -> Result<()> {
        let pins = self.config.pins.select_pins();
        for (pin, level) in pins.into_iter().zip(mode.select_levels()) {
            self.set_level(pin, level)?;
        }
        self.microsteps = mode;
        Ok(())
    }

    fn transition<NEXT: MotorState>(self) -> StepperMotor<PORT, DELAY, NEXT> {
        StepperMotor {
            port: self.port,
            delay: self.delay,
            config: self.config,
            position: self.position,
            enabled: self.enabled,
            microsteps: self.microsteps,
            _state: PhantomData,
        }
    }
}

impl<PORT, DELAY> StepperMotor<PORT, DELAY, Unconfigured>
where
    PORT: OutputPort,
    DELAY: DelayNs,
{
    /// Create a new motor in the Unconfigured state.
    pub(crate) fn new(port: PORT, delay: DELAY, config: MotorConfig) -> Self {
        Self {
            port,
            delay,
            position: Position::new(config.invert_position),
            config,
            enabled: false,
            microsteps: MicrostepMode::default(),
            _state: PhantomData,
        }
    }

    /// Configure the driver lines and zero the position.
    ///
    /// All six pins become outputs; the enable line is driven active when
    /// `enable_initially` is set and inactive otherwise; step and direction
    /// go low; `mode` is encoded on the select lines, M0 first.
    ///
    /// On failure the motor is handed back with the error.
    pub fn init(
        mut self,
        enable_initially: bool,
        mode: MicrostepMode,
    ) -> core::result::Result<StepperMotor<PORT, DELAY, Ready>, (Self, Error)> {
        match self.setup(enable_initially, mode) {
            Ok(()) => {
                info!(
                    "motor initialized: microstep divisor {}, enabled {}",
                    mode.divisor(),
                    enable_initially
                );
                Ok(self.transition())
            }
            Err(e) => Err((self, e)),
        }
    }

    /// [`init`](Self::init) with the flags from the motor configuration.
    pub fn init_from_config(
        self,
    ) -> core::result::Result<StepperMotor<PORT, DELAY, Ready>, (Self, Error)> {
        let enable = self.config.enable_on_init;
        let mode = self.config.microsteps;
        self.init(enable, mode)
    }

    fn setup(&mut self, enable_initially: bool, mode: MicrostepMode) -> Result<()> {
        let pins = self.config.pins;
        for pin in pins.all() {
            self.port
                .configure_output(pin)
                .map_err(|_| Error::Motor(MotorError::PinError))?;
        }

        self.drive_enable(enable_initially)?;
        self.set_level(pins.step, false)?;
        self.set_level(pins.dir, false)?;
        self.encode_microsteps(mode)?;

        self.position.reset();
        Ok(())
    }
}

impl<PORT, DELAY> StepperMotor<PORT, DELAY, Ready>
where
    PORT: OutputPort,
    DELAY: DelayNs,
{
    /// Drive the enable line active (low).
    pub fn enable(&mut self) -> Result<()> {
        self.drive_enable(true)
    }

    /// Drive the enable line inactive (high).
    pub fn disable(&mut self) -> Result<()> {
        self.drive_enable(false)
    }

    /// Microstep mode currently on the select lines.
    #[inline]
    pub fn microstep_mode(&self) -> MicrostepMode {
        self.microsteps
    }

    /// Re-encode the microstep select lines.
    pub fn set_microstep_mode(&mut self, mode: MicrostepMode) -> Result<()> {
        self.encode_microsteps(mode)
    }

    /// Replace the ramp parameters.
    ///
    /// # Errors
    ///
    /// Rejects an invalid delay range and leaves the old parameters in place.
    pub fn set_ramp(&mut self, ramp: RampParameters) -> Result<()> {
        ramp.validate()?;
        self.config.ramp = ramp;
        Ok(())
    }

    /// Set the current position as the origin (zero).
    pub fn set_origin(&mut self) {
        self.position.reset();
    }

    /// Set the current position to a specific value.
    pub fn set_position(&mut self, steps: Steps) {
        self.position.set_steps(steps);
    }

    /// Step `steps` times in `direction`, blocking until done or aborted.
    ///
    /// The move is planned before any line is touched, so configuration
    /// defects come back as errors with the motor untouched. Both abort flags
    /// are lowered on entry and again on exit. `abort` is polled before each
    /// pulse; a raised flag ends the move without emitting that pulse.
    ///
    /// Whatever ends the loop, the driver is settled and disabled before
    /// this returns. A zero-step move runs the same enable, settle and
    /// disable sequence with no pulses in between.
    ///
    /// # Errors
    ///
    /// `Error::Motion` for a profile that cannot be evaluated,
    /// `Error::Motor` if a pin write fails.
    pub fn execute_move(
        &mut self,
        steps: u32,
        direction: Direction,
        abort: &AbortSignal,
    ) -> Result<MoveReport> {
        let profile = MotionProfile::plan(steps, direction, &self.config.ramp)?;
        abort.clear();

        let regime = profile.regime;
        let pins = self.config.pins;
        let delta = self.position.delta(direction);
        let dir_high = (direction == Direction::Forward) != self.config.invert_direction;

        info!("move {} steps, delta {}", steps, delta);

        let mut completed = 0u32;
        let mut aborted = None;
        {
            let mut session = MoveSession {
                port: &mut self.port,
                delay: &mut self.delay,
                enabled: &mut self.enabled,
                enable_pin: pins.enable,
                abort,
            };

            session.set_level(pins.dir, dir_high)?;
            session.set_level(pins.enable, ENABLED_LEVEL)?;
            *session.enabled = true;
            session.delay.delay_ms(SETTLE_MS);

            for timing in MotionExecutor::new(profile) {
                if let Some(kind) = abort.poll() {
                    warn!("move aborted at step {}: {}", timing.index, kind);
                    aborted = Some(kind);
                    break;
                }

                session.pulse(pins.step, timing.half_period_us)?;
                self.position.move_steps(delta);
                completed += 1;
            }
        }

        let position = self.position.steps();
        debug!("move finished: {} of {} steps", completed, steps);

        Ok(MoveReport {
            requested: steps,
            completed,
            aborted,
            regime,
            position,
        })
    }
}

/// Hardware borrowed for the duration of one move.
///
/// Dropping it lowers the abort flags, lets the current settle and disables
/// the driver, on every exit path out of the step loop.
struct MoveSession<'a, PORT, DELAY>
where
    PORT: OutputPort,
    DELAY: DelayNs,
{
    port: &'a mut PORT,
    delay: &'a mut DELAY,
    enabled: &'a mut bool,
    enable_pin: PinId,
    abort: &'a AbortSignal,
}

impl<PORT, DELAY> MoveSession<'_, PORT, DELAY>
where
    PORT: OutputPort,
    DELAY: DelayNs,
{
    fn set_level(&mut self, pin: PinId, high: bool) -> Result<()> {
        self.port
            .set_level(pin, high)
            .map_err(|_| Error::Motor(MotorError::PinError))
    }

    /// One symmetric pulse: high for `half_period_us`, low for the same.
    fn pulse(&mut self, step_pin: PinId, half_period_us: u32) -> Result<()> {
        self.set_level(step_pin, true)?;
        self.delay.delay_us(half_period_us);
        self.set_level(step_pin, false)?;
        self.delay.delay_us(half_period_us);
        Ok(())
    }
}

impl<PORT, DELAY> Drop for MoveSession<'_, PORT, DELAY>
where
    PORT: OutputPort,
    DELAY: DelayNs,
{
    fn drop(&mut self) {
        self.abort.clear();
        self.delay.delay_ms(SETTLE_MS);
        match self.port.set_level(self.enable_pin, !ENABLED_LEVEL) {
            Ok(()) => *self.enabled = false,
            Err(_) => warn!("failed to disable driver after move"),
        }
    }
}
