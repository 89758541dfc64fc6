//! Position tracking for stepper motors.

use crate::config::units::Steps;
use crate::motion::Direction;

/// Motor position tracker.
///
/// Maintains absolute position in steps and the mapping from direction to
/// count sign.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position {
    /// Current position in steps (from origin)
    steps: Steps,
    /// Forward steps count down instead of up
    inverted: bool,
}

impl Position {
    /// Create a tracker at the origin.
    #[inline]
    pub fn new(inverted: bool) -> Self {
        Self {
            steps: Steps::default(),
            inverted,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Set position in steps.
    #[inline]
    pub fn set_steps(&mut self, steps: Steps) {
        self.steps = steps;
    }

    /// Signed change applied for one step in `direction`.
    #[inline]
    pub fn delta(&self, direction: Direction) -> i64 {
        if self.inverted {
            -direction.sign()
        } else {
            direction.sign()
        }
    }

    /// Move by a number of steps, saturating at the ends of the range.
    #[inline]
    pub fn move_steps(&mut self, delta: i64) {
        self.steps = Steps(self.steps.0.saturating_add(delta));
    }

    /// Reset position to origin (0 steps).
    #[inline]
    pub fn reset(&mut self) {
        self.steps = Steps::default();
    }
}
