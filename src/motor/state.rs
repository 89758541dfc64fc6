//! Motor state type-state markers.
//!
//! Uses Rust's type system to enforce valid state transitions at compile time.

/// Motor has been built but its pins have not been set up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

/// Pins configured and position zeroed; the motor accepts moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ready;

/// Trait for motor states.
pub trait MotorState: private::Sealed {}

impl MotorState for Unconfigured {}
impl MotorState for Ready {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Unconfigured {}
    impl Sealed for super::Ready {}
}

/// State name for display/debugging.
pub trait StateName {
    /// Get the state name as a static string.
    fn name() -> &'static str;
}

impl StateName for Unconfigured {
    fn name() -> &'static str {
        "Unconfigured"
    }
}

impl StateName for Ready {
    fn name() -> &'static str {
        "Ready"
    }
}
