//! Pin assignment for a single driver.

use serde::Deserialize;

/// GPIO number of one driver line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct PinId(pub u8);

/// Role of a pin within the driver interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// Step pulse input.
    Step,
    /// Direction input.
    Dir,
    /// Microstep select, least significant bit.
    M0,
    /// Microstep select, middle bit.
    M1,
    /// Microstep select, most significant bit.
    M2,
    /// Active-low enable.
    Enable,
}

/// The six lines wired from the MCU to the stepper driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PinMap {
    /// Step pulse output.
    pub step: PinId,
    /// Direction output.
    pub dir: PinId,
    /// Microstep select bit 0.
    pub m0: PinId,
    /// Microstep select bit 1.
    pub m1: PinId,
    /// Microstep select bit 2.
    pub m2: PinId,
    /// Enable output (logic low enables the driver).
    pub enable: PinId,
}

impl PinMap {
    /// Create a pin map.
    pub const fn new(step: u8, dir: u8, m0: u8, m1: u8, m2: u8, enable: u8) -> Self {
        Self {
            step: PinId(step),
            dir: PinId(dir),
            m0: PinId(m0),
            m1: PinId(m1),
            m2: PinId(m2),
            enable: PinId(enable),
        }
    }

    /// All pins in wiring order: step, dir, m0, m1, m2, enable.
    pub fn all(&self) -> [PinId; 6] {
        [self.step, self.dir, self.m0, self.m1, self.m2, self.enable]
    }

    /// Microstep select pins ordered least significant first.
    pub fn select_pins(&self) -> [PinId; 3] {
        [self.m0, self.m1, self.m2]
    }

    /// Look up which role a pin plays.
    pub fn role_of(&self, pin: PinId) -> Option<PinRole> {
        const ROLES: [PinRole; 6] = [
            PinRole::Step,
            PinRole::Dir,
            PinRole::M0,
            PinRole::M1,
            PinRole::M2,
            PinRole::Enable,
        ];
        self.all()
            .iter()
            .zip(ROLES)
            .find(|(id, _)| **id == pin)
            .map(|(_, role)| role)
    }

    /// First pin that appears more than once, if any.
    pub fn first_duplicate(&self) -> Option<PinId> {
        let pins = self.all();
        pins.iter()
            .enumerate()
            .find(|&(i, pin)| pins[i + 1..].contains(pin))
            .map(|(_, pin)| *pin)
    }
}
