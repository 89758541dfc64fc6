//! Shared test doubles for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use embedded_hal::delay::DelayNs;
use stepper_ramp::motor::OutputPort;
use stepper_ramp::{AbortSignal, PinId};

/// Port that remembers the last level of every pin and counts step pulses.
#[derive(Debug, Default)]
pub struct LevelPort {
    pub levels: HashMap<u8, bool>,
    pub configured: Vec<u8>,
    pub writes: Vec<(u8, bool)>,
}

impl LevelPort {
    pub fn level(&self, pin: u8) -> Option<bool> {
        self.levels.get(&pin).copied()
    }

    pub fn rising_edges(&self, pin: u8) -> usize {
        self.writes.iter().filter(|w| **w == (pin, true)).count()
    }
}

impl OutputPort for LevelPort {
    type Error = core::convert::Infallible;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.configured.push(pin.0);
        Ok(())
    }

    fn set_level(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error> {
        self.levels.insert(pin.0, high);
        self.writes.push((pin.0, high));
        Ok(())
    }
}

/// Clock that never sleeps, logging microsecond and millisecond waits.
#[derive(Debug, Default)]
pub struct LogClock {
    pub micros: Vec<u32>,
    pub millis: Vec<u32>,
    /// Raise `kill` on the signal after this many microsecond waits.
    pub kill_after: Option<(usize, &'static AbortSignal)>,
}

impl LogClock {
    /// Half periods, one per completed step (the high half).
    pub fn half_periods(&self) -> Vec<u32> {
        self.micros.chunks(2).map(|pair| pair[0]).collect()
    }
}

impl DelayNs for LogClock {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_us(&mut self, us: u32) {
        self.micros.push(us);
        if let Some((after, signal)) = self.kill_after {
            if self.micros.len() == after {
                signal.request_kill();
            }
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.millis.push(ms);
    }
}
