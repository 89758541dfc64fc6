//! Motor module for stepper-ramp.
//!
//! Provides the stepper motor driver with type-state safety, the output port
//! abstraction and position tracking.

mod builder;
mod driver;
mod port;
mod position;
pub mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use builder::StepperMotorBuilder;
pub use driver::{MoveReport, StepperMotor, SETTLE_MS};
pub use port::{HalPins, OutputPort, PortError};
pub use position::Position;
pub use state::{MotorState, Ready, StateName, Unconfigured};
