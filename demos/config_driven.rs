//! Configuration-driven example.
//!
//! Parses a TOML motor table, builds each configured motor over a port that
//! prints every line change, and runs a short move on each.

use stepper_ramp::{parse_config, AbortSignal, Direction, OutputPort, PinId, StepperMotor};

/// Port that logs pin writes instead of touching GPIO.
struct PrintPort {
    label: &'static str,
    writes: usize,
}

impl OutputPort for PrintPort {
    type Error = core::convert::Infallible;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        println!("  [{}] pin {} -> output", self.label, pin.0);
        Ok(())
    }

    fn set_level(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error> {
        self.writes += 1;
        // step pulses would flood the console
        if self.writes <= 12 {
            println!("  [{}] pin {} -> {}", self.label, pin.0, if high { "high" } else { "low" });
        }
        Ok(())
    }
}

/// Delay provider that does not wait.
struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

const CONFIG: &str = r#"
[motors.x_axis]
name = "X-Axis"
microsteps = 8
pins = { step = 2, dir = 3, m0 = 4, m1 = 5, m2 = 6, enable = 7 }
ramp = { accel_steps = 200, decel_steps = 150, max_delay_us = 3200, min_delay_us = 200 }

[motors.z_axis]
name = "Z-Axis"
microsteps = 32
enable_on_init = true
invert_direction = true
pins = { step = 20, dir = 21, m0 = 22, m1 = 23, m2 = 24, enable = 25 }
ramp = { accel_steps = 40, decel_steps = 40, max_delay_us = 2000, min_delay_us = 400 }
"#;

fn main() {
    println!("=== Configuration-Driven Example ===\n");

    let config = match parse_config(CONFIG) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    let abort = AbortSignal::new();
    let labels = ["x", "z"];

    for (name, label) in config.motor_names().zip(labels) {
        println!("Motor '{}':", name);

        let result = StepperMotor::builder()
            .from_config(&config, name)
            .and_then(|builder| {
                builder
                    .port(PrintPort { label, writes: 0 })
                    .delay(NoDelay)
                    .build()
            })
            .and_then(|motor| motor.init_from_config().map_err(|(_, e)| e));

        let mut motor = match result {
            Ok(motor) => motor,
            Err(e) => {
                eprintln!("  setup failed: {}", e);
                continue;
            }
        };

        println!(
            "  {} ready, 1/{} stepping, enabled {}",
            motor.name(),
            motor.microstep_mode().divisor(),
            motor.is_enabled()
        );

        match motor.execute_move(400, Direction::Forward, &abort) {
            Ok(report) => println!(
                "  moved {} steps ({:?}), position {}\n",
                report.completed,
                report.regime,
                report.position.value()
            ),
            Err(e) => eprintln!("  move failed: {}\n", e),
        }
    }

    println!("=== Example Complete ===");
}
