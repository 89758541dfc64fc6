//! Digital output port abstraction.
//!
//! The motor addresses its six lines by [`PinId`]. Boards with a pin-number
//! GPIO API can implement [`OutputPort`] directly; boards that hand out typed
//! embedded-hal pins can wrap them in [`HalPins`].

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{PinId, PinMap, PinRole};

/// A bank of digital outputs addressed by pin id.
pub trait OutputPort {
    /// Error raised by the underlying GPIO.
    type Error: core::fmt::Debug;

    /// Put `pin` into push-pull output mode.
    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Drive `pin` high (`true`) or low (`false`).
    fn set_level(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error>;
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    type Error = T::Error;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        (**self).configure_output(pin)
    }

    fn set_level(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error> {
        (**self).set_level(pin, high)
    }
}

/// Errors from [`HalPins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// The pin id is not part of the pin map.
    UnknownPin(PinId),
    /// The embedded-hal pin for this role reported an error.
    Pin(PinRole),
}

/// [`OutputPort`] over six embedded-hal output pins.
///
/// embedded-hal pins are already typed as outputs, so configuring only checks
/// that the id belongs to the map.
pub struct HalPins<STEP, DIR, M0, M1, M2, EN> {
    map: PinMap,
    step: STEP,
    dir: DIR,
    m0: M0,
    m1: M1,
    m2: M2,
    enable: EN,
}

impl<STEP, DIR, M0, M1, M2, EN> HalPins<STEP, DIR, M0, M1, M2, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    M0: OutputPin,
    M1: OutputPin,
    M2: OutputPin,
    EN: OutputPin,
{
    /// Bind pins to the ids in `map`.
    pub fn new(map: PinMap, step: STEP, dir: DIR, m0: M0, m1: M1, m2: M2, enable: EN) -> Self {
        Self {
            map,
            step,
            dir,
            m0,
            m1,
            m2,
            enable,
        }
    }

    /// The pin map used for routing.
    #[inline]
    pub fn map(&self) -> &PinMap {
        &self.map
    }

    /// Give the pins back.
    pub fn release(self) -> (STEP, DIR, M0, M1, M2, EN) {
        (self.step, self.dir, self.m0, self.m1, self.m2, self.enable)
    }

    fn role(&self, pin: PinId) -> Result<PinRole, PortError> {
        self.map.role_of(pin).ok_or(PortError::UnknownPin(pin))
    }
}

/// Drive one embedded-hal pin, tagging failures with its role.
fn drive<P: OutputPin>(pin: &mut P, high: bool, role: PinRole) -> Result<(), PortError> {
    pin.set_state(PinState::from(high))
        .map_err(|_| PortError::Pin(role))
}

impl<STEP, DIR, M0, M1, M2, EN> OutputPort for HalPins<STEP, DIR, M0, M1, M2, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    M0: OutputPin,
    M1: OutputPin,
    M2: OutputPin,
    EN: OutputPin,
{
    type Error = PortError;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.role(pin).map(|_| ())
    }

    fn set_level(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error> {
        let role = self.role(pin)?;
        match role {
            PinRole::Step => drive(&mut self.step, high, role),
            PinRole::Dir => drive(&mut self.dir, high, role),
            PinRole::M0 => drive(&mut self.m0, high, role),
            PinRole::M1 => drive(&mut self.m1, high, role),
            PinRole::M2 => drive(&mut self.m2, high, role),
            PinRole::Enable => drive(&mut self.enable, high, role),
        }
    }
}
