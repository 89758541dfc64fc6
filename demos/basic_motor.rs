//! Basic motor control example.
//!
//! Builds a motor over six embedded-hal pins, prints the planned profile for
//! a long and a short move, then runs a move that a second thread stops
//! part-way through.
//!
//! The pins only record their level, so this runs without real hardware.

use std::thread;
use std::time::Duration;

use stepper_ramp::{
    AbortSignal, Direction, HalPins, MicrostepMode, MotionProfile, PinMap, RampParameters,
    StepperMotor,
};

/// Shared between the move and the thread that stops it.
static ABORT: AbortSignal = AbortSignal::new();

/// Delay provider backed by the host's sleep.
struct StdDelay;

impl embedded_hal::delay::DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        // In real code, this would use hardware timer
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}

/// Mock output pin for demonstration.
struct MockPin {
    state: bool,
}

impl MockPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

fn print_profile(profile: &MotionProfile) {
    println!("Total steps: {} ({:?})", profile.total_steps, profile.regime);
    println!("Acceleration phase: {} steps", profile.accel_steps);
    println!("Cruise phase: {} steps", profile.cruise_steps);
    println!("Deceleration phase: {} steps", profile.decel_steps);
    println!(
        "First/last half period: {:?} / {:?} us",
        profile.delay_at(0),
        profile.delay_at(profile.total_steps.saturating_sub(1))
    );
    println!("Estimated duration: {:.3} seconds", profile.duration_us() as f64 / 1e6);
}

fn main() {
    println!("=== Basic Motor Control Example ===\n");

    let map = PinMap::new(2, 3, 4, 5, 6, 7);
    let ramp = RampParameters::new(200, 150, 3200, 200);

    let pins = HalPins::new(
        map,
        MockPin::new(),
        MockPin::new(),
        MockPin::new(),
        MockPin::new(),
        MockPin::new(),
        MockPin::new(),
    );

    let mut motor = StepperMotor::builder()
        .name("demo_motor")
        .port(pins)
        .delay(StdDelay)
        .pins(map)
        .ramp(ramp)
        .build()
        .expect("Failed to build motor")
        .init(false, MicrostepMode::Sixteenth)
        .map_err(|(_, e)| e)
        .expect("Failed to initialize motor");

    println!("Motor created: {}", motor.name());
    println!("Microstep divisor: {}", motor.microstep_mode().divisor());
    println!("State: {}", motor.state_name());

    println!("\n=== Long Move Profile ===");
    let long = MotionProfile::plan(1000, Direction::Forward, &ramp).expect("Failed to plan");
    print_profile(&long);

    println!("\n=== Short Move Profile ===");
    let short = MotionProfile::plan(120, Direction::Forward, &ramp).expect("Failed to plan");
    print_profile(&short);

    println!("\n=== Full Move ===");
    let report = motor
        .execute_move(1000, Direction::Forward, &ABORT)
        .expect("Move failed");
    println!("Completed {} of {} steps", report.completed, report.requested);
    println!("Position: {} steps", motor.position().value());

    println!("\n=== Stopped Move ===");
    let stopper = thread::spawn(|| {
        thread::sleep(Duration::from_millis(300));
        ABORT.request_stop();
    });

    let report = motor
        .execute_move(5000, Direction::Reverse, &ABORT)
        .expect("Move failed");
    stopper.join().expect("stop thread panicked");

    println!(
        "Completed {} of {} steps (aborted: {:?})",
        report.completed, report.requested, report.aborted
    );
    println!("Position: {} steps", motor.position().value());
    println!("Driver enabled: {}", motor.is_enabled());

    println!("\n=== Example Complete ===");
}
