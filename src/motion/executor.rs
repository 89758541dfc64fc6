//! Motion execution - walks a planned profile one step at a time.

use super::profile::{MotionPhase, MotionProfile};

/// Timing for one step pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepTiming {
    /// Step index within the move.
    pub index: u32,
    /// Phase the step belongs to.
    pub phase: MotionPhase,
    /// Half period in microseconds (high time, then low time).
    pub half_period_us: u32,
}

/// Runtime state during motion execution.
#[derive(Debug, Clone)]
pub struct MotionExecutor {
    /// The planned profile being executed.
    profile: MotionProfile,

    /// Index of the next step to hand out.
    current_step: u32,

    /// Phase of the next step.
    phase: MotionPhase,
}

impl MotionExecutor {
    /// Create a new executor for a motion profile.
    pub fn new(profile: MotionProfile) -> Self {
        let phase = profile.phase_at(0);
        Self {
            profile,
            current_step: 0,
            phase,
        }
    }

    /// Check if motion is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == MotionPhase::Complete
    }

    /// Number of steps handed out so far.
    #[inline]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Get the total number of steps.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.profile.total_steps
    }

    /// Get steps remaining.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.profile.total_steps.saturating_sub(self.current_step)
    }

    /// Phase of the next step.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Get the motion profile.
    #[inline]
    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    /// Reset the executor to the beginning.
    pub fn reset(&mut self) {
        self.current_step = 0;
        self.phase = self.profile.phase_at(0);
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.profile.total_steps == 0 {
            1.0
        } else {
            self.current_step as f32 / self.profile.total_steps as f32
        }
    }
}

impl Iterator for MotionExecutor {
    type Item = StepTiming;

    fn next(&mut self) -> Option<StepTiming> {
        let index = self.current_step;
        let phase = self.profile.phase_at(index);
        let half_period_us = self.profile.delay_at(index)?;

        self.current_step += 1;
        self.phase = self.profile.phase_at(self.current_step);

        if self.phase != phase {
            trace!("phase {} -> {} at step {}", phase, self.phase, self.current_step);
        }

        Some(StepTiming {
            index,
            phase,
            half_period_us,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps_remaining() as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RampParameters;
    use crate::motion::{Direction, MoveRegime};

    fn ramp() -> RampParameters {
        RampParameters::new(200, 150, 3200, 200)
    }

    #[test]
    fn test_executor_complete() {
        let profile = MotionProfile::plan(10, Direction::Forward, &ramp()).unwrap();
        let mut executor = MotionExecutor::new(profile);

        assert!(!executor.is_complete());
        assert_eq!(executor.current_step(), 0);

        assert_eq!(executor.by_ref().count(), 10);

        assert!(executor.is_complete());
        assert_eq!(executor.current_step(), 10);
        assert_eq!(executor.next(), None);
    }

    #[test]
    fn test_zero_profile() {
        let executor = MotionExecutor::new(MotionProfile::zero(Direction::Forward));

        assert!(executor.is_complete());
        assert_eq!(executor.steps_remaining(), 0);
        assert_eq!(executor.progress(), 1.0);
    }

    #[test]
    fn test_phase_sequence_long_move() {
        let profile = MotionProfile::plan(1000, Direction::Forward, &ramp()).unwrap();
        assert_eq!(profile.regime, MoveRegime::Long);
        let executor = MotionExecutor::new(profile);

        let mut transitions: heapless::Vec<(u32, MotionPhase), 8> = heapless::Vec::new();
        let mut last = None;
        for timing in executor {
            if last != Some(timing.phase) {
                transitions.push((timing.index, timing.phase)).unwrap();
                last = Some(timing.phase);
            }
        }

        assert_eq!(
            transitions.as_slice(),
            &[
                (0, MotionPhase::Accelerating),
                (200, MotionPhase::Cruising),
                (850, MotionPhase::Decelerating),
            ]
        );
    }

    #[test]
    fn test_short_move_single_phase() {
        let profile = MotionProfile::plan(40, Direction::Reverse, &ramp()).unwrap();
        let executor = MotionExecutor::new(profile);
        assert!(executor.map(|t| t.phase).all(|p| p == MotionPhase::ShortRamp));
    }

    #[test]
    fn test_reset_and_progress() {
        let profile = MotionProfile::plan(400, Direction::Forward, &ramp()).unwrap();
        let mut executor = MotionExecutor::new(profile);
        executor.by_ref().take(200).for_each(drop);
        assert_eq!(executor.progress(), 0.5);
        assert_eq!(executor.phase(), MotionPhase::Cruising);

        executor.reset();
        assert_eq!(executor.current_step(), 0);
        assert_eq!(executor.phase(), MotionPhase::Accelerating);
        assert_eq!(executor.size_hint(), (400, Some(400)));
    }
}
