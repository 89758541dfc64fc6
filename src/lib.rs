//! # stepper-ramp
//!
//! Cosine-ramped stepper motor sequencing with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Cosine ramps**: Half-cosine acceleration and deceleration around a
//!   constant cruise, with a single corrected envelope for short moves
//! - **Cooperative abort**: Stop/kill flags safe to raise from interrupt handlers
//! - **Guaranteed cleanup**: The driver is settled and disabled on every exit path
//! - **Microstep selection**: Explicit modes encoded on the M0/M1/M2 lines
//! - **Configuration-driven**: Define motors in TOML files
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_ramp::{AbortSignal, Direction, MicrostepMode, StepperMotor};
//!
//! static ABORT: AbortSignal = AbortSignal::new();
//!
//! let config = stepper_ramp::load_config("motors.toml")?;
//!
//! let mut motor = StepperMotor::builder()
//!     .from_config(&config, "x_axis")?
//!     .port(port)
//!     .delay(delay)
//!     .build()?
//!     .init(false, MicrostepMode::Sixteenth)
//!     .map_err(|(_, e)| e)?;
//!
//! let report = motor.execute_move(1000, Direction::Forward, &ABORT)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, MicrostepMode, MotorConfig, PinId, PinMap, RampParameters, Steps, SystemConfig};
pub use error::{Error, Result};
pub use motion::{AbortKind, AbortSignal, Direction, MotionPhase, MotionProfile, MoveRegime};
pub use motor::{state, HalPins, MoveReport, OutputPort, StepperMotor, StepperMotorBuilder};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
