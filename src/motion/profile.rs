//! Motion profile planning.
//!
//! Splits a move into phases and binds each phase to the delay curve it uses.
//! Planning performs every check that could fault during evaluation, so a
//! planned profile can be stepped through without further errors.

use crate::config::RampParameters;
use crate::error::MotionError;

use super::calculator::{cruise_delay_us, RampSegment, ShortEnvelope};

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// DIR line high, position counts up.
    Forward,
    /// DIR line low, position counts down.
    Reverse,
}

impl Direction {
    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// The other direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// Current phase of motion execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Accelerating from rest toward cruise cadence.
    Accelerating,
    /// Stepping at the minimum delay.
    Cruising,
    /// Decelerating from cruise cadence to rest.
    Decelerating,
    /// Single envelope of a move too short to cruise.
    ShortRamp,
    /// Motion complete (motor idle).
    Complete,
}

/// How a move of a given length is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveRegime {
    /// `steps <= accel + decel`: one cosine envelope over the whole move.
    Short,
    /// `steps > accel + decel`: accelerate, cruise, decelerate.
    Long,
}

impl MoveRegime {
    /// Select the regime for a move of `steps` steps.
    #[inline]
    pub fn for_steps(steps: u32, ramp: &RampParameters) -> Self {
        if steps as u64 <= ramp.ramp_steps() {
            MoveRegime::Short
        } else {
            MoveRegime::Long
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Curve {
    Empty,
    Short(ShortEnvelope),
    Long {
        accel: Option<RampSegment>,
        decel: Option<RampSegment>,
        cruise_delay_us: u32,
    },
}

/// Planned profile for one move.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionProfile {
    /// Total steps to move.
    pub total_steps: u32,

    /// Direction of motion.
    pub direction: Direction,

    /// Shape of the move.
    pub regime: MoveRegime,

    /// Steps in acceleration phase (zero for short moves).
    pub accel_steps: u32,

    /// Steps in cruise phase (zero for short moves).
    pub cruise_steps: u32,

    /// Steps in deceleration phase (zero for short moves).
    pub decel_steps: u32,

    curve: Curve,
}

impl MotionProfile {
    /// Plan a move of `steps` steps.
    ///
    /// # Errors
    ///
    /// `MotionError::ZeroLengthRamp` when the move is short and the
    /// configuration has no acceleration ramp for the envelope to scale
    /// against. Long moves simply skip empty ramps, so `accel + decel == 0`
    /// yields a constant-cadence move.
    pub fn plan(steps: u32, direction: Direction, ramp: &RampParameters) -> Result<Self, MotionError> {
        if steps == 0 {
            return Ok(Self::zero(direction));
        }

        let regime = MoveRegime::for_steps(steps, ramp);
        let profile = match regime {
            MoveRegime::Short => Self {
                total_steps: steps,
                direction,
                regime,
                accel_steps: 0,
                cruise_steps: 0,
                decel_steps: 0,
                curve: Curve::Short(ShortEnvelope::new(steps, ramp)?),
            },
            MoveRegime::Long => {
                // steps > accel + decel, so the subtraction cannot underflow
                let cruise_steps = steps - ramp.accel_steps - ramp.decel_steps;
                Self {
                    total_steps: steps,
                    direction,
                    regime,
                    accel_steps: ramp.accel_steps,
                    cruise_steps,
                    decel_steps: ramp.decel_steps,
                    curve: Curve::Long {
                        accel: RampSegment::acceleration(ramp).ok(),
                        decel: RampSegment::deceleration(ramp).ok(),
                        cruise_delay_us: cruise_delay_us(ramp),
                    },
                }
            }
        };

        debug!(
            "planned {} steps: accel {} cruise {} decel {}",
            profile.total_steps, profile.accel_steps, profile.cruise_steps, profile.decel_steps
        );
        Ok(profile)
    }

    /// Create a zero-length profile (no motion).
    pub fn zero(direction: Direction) -> Self {
        Self {
            total_steps: 0,
            direction,
            regime: MoveRegime::Short,
            accel_steps: 0,
            cruise_steps: 0,
            decel_steps: 0,
            curve: Curve::Empty,
        }
    }

    /// Check if this is a zero-length profile.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.total_steps == 0
    }

    /// Index of the first cruise step.
    #[inline]
    pub fn cruise_start(&self) -> u32 {
        self.accel_steps
    }

    /// Index of the first deceleration step.
    #[inline]
    pub fn decel_start(&self) -> u32 {
        self.accel_steps + self.cruise_steps
    }

    /// Get the phase at a given step index.
    pub fn phase_at(&self, step: u32) -> MotionPhase {
        if step >= self.total_steps {
            return MotionPhase::Complete;
        }
        match self.regime {
            MoveRegime::Short => MotionPhase::ShortRamp,
            MoveRegime::Long if step < self.cruise_start() => MotionPhase::Accelerating,
            MoveRegime::Long if step < self.decel_start() => MotionPhase::Cruising,
            MoveRegime::Long => MotionPhase::Decelerating,
        }
    }

    /// Half period for the step at `step`, in microseconds.
    ///
    /// Returns `None` past the end of the move.
    pub fn delay_at(&self, step: u32) -> Option<u32> {
        let phase = self.phase_at(step);
        match (self.curve, phase) {
            (_, MotionPhase::Complete) | (Curve::Empty, _) => None,
            (Curve::Short(envelope), _) => Some(envelope.delay_us(step)),
            (Curve::Long { accel, decel, cruise_delay_us }, phase) => match phase {
                MotionPhase::Accelerating => accel.map(|segment| segment.delay_us(step)),
                MotionPhase::Decelerating => {
                    decel.map(|segment| segment.delay_us(step - self.decel_start()))
                }
                _ => Some(cruise_delay_us),
            },
        }
    }

    /// Total time spent pulsing, in microseconds, excluding settle time.
    pub fn duration_us(&self) -> u64 {
        (0..self.total_steps)
            .filter_map(|step| self.delay_at(step))
            .map(|half| 2 * half as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> RampParameters {
        RampParameters::new(200, 150, 3200, 200)
    }

    #[test]
    fn test_long_move_boundaries() {
        let profile = MotionProfile::plan(1000, Direction::Forward, &ramp()).unwrap();

        assert_eq!(profile.regime, MoveRegime::Long);
        assert_eq!(profile.accel_steps, 200);
        assert_eq!(profile.cruise_steps, 650);
        assert_eq!(profile.decel_steps, 150);
        assert_eq!(profile.cruise_start(), 200);
        assert_eq!(profile.decel_start(), 850);

        assert_eq!(profile.phase_at(199), MotionPhase::Accelerating);
        assert_eq!(profile.phase_at(200), MotionPhase::Cruising);
        assert_eq!(profile.phase_at(849), MotionPhase::Cruising);
        assert_eq!(profile.phase_at(850), MotionPhase::Decelerating);
        assert_eq!(profile.phase_at(999), MotionPhase::Decelerating);
        assert_eq!(profile.phase_at(1000), MotionPhase::Complete);
    }

    #[test]
    fn test_cruise_delay_constant() {
        let profile = MotionProfile::plan(1000, Direction::Forward, &ramp()).unwrap();
        for step in 200..850 {
            assert_eq!(profile.delay_at(step), Some(100));
        }
        assert_eq!(profile.delay_at(1000), None);
    }

    #[test]
    fn test_regime_boundary() {
        let ramp = ramp();
        assert_eq!(MoveRegime::for_steps(349, &ramp), MoveRegime::Short);
        assert_eq!(MoveRegime::for_steps(350, &ramp), MoveRegime::Short);
        assert_eq!(MoveRegime::for_steps(351, &ramp), MoveRegime::Long);

        let profile = MotionProfile::plan(350, Direction::Forward, &ramp).unwrap();
        assert_eq!(profile.phase_at(0), MotionPhase::ShortRamp);
        assert_eq!(profile.phase_at(349), MotionPhase::ShortRamp);

        let profile = MotionProfile::plan(351, Direction::Forward, &ramp).unwrap();
        assert_eq!(profile.cruise_steps, 1);
    }

    #[test]
    fn test_zero_ramp_long_move_is_constant() {
        let ramp = RampParameters::new(0, 0, 3200, 200);
        let profile = MotionProfile::plan(10, Direction::Reverse, &ramp).unwrap();
        assert_eq!(profile.regime, MoveRegime::Long);
        assert_eq!(profile.cruise_steps, 10);
        assert!((0..10).all(|s| profile.delay_at(s) == Some(100)));
    }

    #[test]
    fn test_short_move_without_accel_rejected() {
        let ramp = RampParameters::new(0, 150, 3200, 200);
        assert!(matches!(
            MotionProfile::plan(100, Direction::Forward, &ramp),
            Err(MotionError::ZeroLengthRamp(_))
        ));
        // the same configuration can still make long moves
        let profile = MotionProfile::plan(400, Direction::Forward, &ramp).unwrap();
        assert_eq!(profile.accel_steps, 0);
        assert_eq!(profile.phase_at(0), MotionPhase::Cruising);
        assert_eq!(profile.delay_at(250), Some(100));
    }

    #[test]
    fn test_zero_profile() {
        let profile = MotionProfile::plan(0, Direction::Forward, &ramp()).unwrap();
        assert!(profile.is_zero());
        assert_eq!(profile.delay_at(0), None);
        assert_eq!(profile.duration_us(), 0);
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Forward.sign(), 1);
        assert_eq!(Direction::Reverse.sign(), -1);
        assert_eq!(Direction::Forward.reversed(), Direction::Reverse);
    }
}
