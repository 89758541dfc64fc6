//! Recording doubles for driver tests.

use embedded_hal::delay::DelayNs;

use crate::config::PinId;
use crate::motion::AbortSignal;

use super::port::OutputPort;

/// One call made on a [`RecordingPort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Configure(PinId),
    Level(PinId, bool),
}

/// Write rejected by a [`RecordingPort`] set up to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault(pub PinId);

/// Port that logs every call.
///
/// With `fail_after` set, writes to that pin fail once it has accepted the
/// given number of writes.
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub events: Vec<Event>,
    pub configured: Vec<PinId>,
    pub fail_after: Option<(PinId, usize)>,
}

impl RecordingPort {
    /// Last level written to `pin`.
    pub fn level(&self, pin: PinId) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match *e {
            Event::Level(p, high) if p == pin => Some(high),
            _ => None,
        })
    }

    /// Rising edges written to `pin`.
    pub fn pulses(&self, pin: PinId) -> usize {
        self.events
            .iter()
            .filter(|e| **e == Event::Level(pin, true))
            .count()
    }
}

impl OutputPort for RecordingPort {
    type Error = PinFault;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.configured.push(pin);
        self.events.push(Event::Configure(pin));
        Ok(())
    }

    fn set_level(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error> {
        if let Some((failing, after)) = self.fail_after {
            let accepted = self
                .events
                .iter()
                .filter(|e| matches!(e, Event::Level(p, _) if *p == failing))
                .count();
            if pin == failing && accepted >= after {
                return Err(PinFault(pin));
            }
        }
        self.events.push(Event::Level(pin, high));
        Ok(())
    }
}

/// Delay that returns at once and logs what it was asked for.
///
/// With `trip` set, requests a stop on the signal once the given number of
/// microsecond waits have been recorded.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub micros: Vec<u32>,
    pub millis: Vec<u32>,
    pub trip: Option<(usize, &'static AbortSignal)>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_us(&mut self, us: u32) {
        self.micros.push(us);
        if let Some((after, signal)) = self.trip {
            if self.micros.len() == after {
                signal.request_stop();
            }
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.millis.push(ms);
    }
}
