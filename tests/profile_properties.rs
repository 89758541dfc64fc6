//! Property tests for motion profile planning.

use proptest::prelude::*;
use stepper_ramp::error::MotionError;
use stepper_ramp::motion::{MotionExecutor, RampKind};
use stepper_ramp::{Direction, MotionPhase, MotionProfile, MoveRegime, RampParameters};

prop_compose! {
    fn valid_ramp()(
        accel in 0u32..400,
        decel in 0u32..400,
        min in 1u32..2000,
        span in 1u32..6000,
    ) -> RampParameters {
        RampParameters::new(accel, decel, min + span, min)
    }
}

fn delays(profile: &MotionProfile) -> Vec<u32> {
    (0..profile.total_steps)
        .map(|step| profile.delay_at(step).expect("step inside the move has a delay"))
        .collect()
}

proptest! {
    #[test]
    fn test_regime_is_exclusive(ramp in valid_ramp(), steps in 1u32..2000) {
        let regime = MoveRegime::for_steps(steps, &ramp);
        let short = steps as u64 <= ramp.accel_steps as u64 + ramp.decel_steps as u64;
        prop_assert_eq!(regime == MoveRegime::Short, short);
    }
}

proptest! {
    #[test]
    fn test_short_move_needs_accel_ramp(ramp in valid_ramp(), steps in 1u32..2000) {
        let result = MotionProfile::plan(steps, Direction::Forward, &ramp);
        let short = MoveRegime::for_steps(steps, &ramp) == MoveRegime::Short;
        if short && ramp.accel_steps == 0 {
            prop_assert_eq!(
                result.err(),
                Some(MotionError::ZeroLengthRamp(RampKind::Acceleration))
            );
        } else {
            prop_assert!(result.is_ok());
        }
    }
}

proptest! {
    #[test]
    fn test_long_move_shape(ramp in valid_ramp(), extra in 1u32..500) {
        let steps = ramp.accel_steps + ramp.decel_steps + extra;
        let profile = MotionProfile::plan(steps, Direction::Reverse, &ramp).unwrap();
        prop_assert_eq!(profile.regime, MoveRegime::Long);
        prop_assert_eq!(
            profile.accel_steps + profile.cruise_steps + profile.decel_steps,
            steps
        );
        prop_assert_eq!(profile.cruise_steps, extra);

        let halves = delays(&profile);
        let accel = profile.cruise_start() as usize;
        let decel = profile.decel_start() as usize;

        prop_assert!(halves[..accel].windows(2).all(|w| w[1] <= w[0]));
        prop_assert!(halves[accel..decel].iter().all(|&h| h == ramp.min_delay_us / 2));
        prop_assert!(halves[decel..].windows(2).all(|w| w[1] >= w[0]));
        prop_assert!(halves.iter().all(|&h| h <= ramp.max_delay_us / 2 + 1));
    }
}

proptest! {
    #[test]
    fn test_short_move_is_symmetric(ramp in valid_ramp(), steps in 1u32..400) {
        prop_assume!(ramp.accel_steps > 0);
        prop_assume!(steps as u64 <= ramp.ramp_steps());

        let profile = MotionProfile::plan(steps, Direction::Forward, &ramp).unwrap();
        let halves = delays(&profile);

        prop_assert_eq!(profile.phase_at(0), MotionPhase::ShortRamp);
        prop_assert!(halves.iter().all(|&h| h <= ramp.max_delay_us / 2 + 1));
        // cos(2 pi i / n) == cos(2 pi (n - i) / n), up to truncation
        for i in 1..steps as usize {
            let mirrored = halves[steps as usize - i];
            prop_assert!(halves[i].abs_diff(mirrored) <= 1, "step {} vs {}", i, steps as usize - i);
        }
    }
}

proptest! {
    #[test]
    fn test_executor_yields_every_step(ramp in valid_ramp(), steps in 0u32..1500) {
        prop_assume!(ramp.accel_steps > 0);

        let profile = MotionProfile::plan(steps, Direction::Forward, &ramp).unwrap();
        let timings: Vec<_> = MotionExecutor::new(profile.clone()).collect();

        prop_assert_eq!(timings.len(), steps as usize);
        for (i, timing) in timings.iter().enumerate() {
            prop_assert_eq!(timing.index, i as u32);
            prop_assert_eq!(Some(timing.half_period_us), profile.delay_at(i as u32));
            prop_assert_eq!(timing.phase, profile.phase_at(i as u32));
        }
    }
}
