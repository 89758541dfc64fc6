//! Motion module for stepper-ramp.
//!
//! Provides delay curve math, move planning, step iteration and abort
//! signalling.

mod abort;
pub mod calculator;
mod executor;
mod profile;

pub use abort::{AbortKind, AbortSignal};
pub use calculator::{RampKind, RampSegment, ShortEnvelope};
pub use executor::{MotionExecutor, StepTiming};
pub use profile::{Direction, MotionPhase, MotionProfile, MoveRegime};
