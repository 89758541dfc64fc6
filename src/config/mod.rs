//! Configuration module for stepper-ramp.
//!
//! Provides types for loading and validating motor configurations from TOML
//! files (with `std` feature) or from values built in code.

mod motor;
mod pins;
mod ramp;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use pins::{PinId, PinMap, PinRole};
pub use ramp::RampParameters;
pub use system::SystemConfig;
pub use validation::{validate_config, validate_motor};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{MicrostepMode, Steps};
