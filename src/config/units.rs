//! Unit types for motor position and microstep resolution.

use serde::Deserialize;

use crate::error::ConfigError;

/// Motor position in steps (absolute from origin).
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }
}

/// Microstep resolution selected through the driver's M0/M1/M2 lines.
///
/// The discriminant is the 3-bit code driven onto the select lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MicrostepMode {
    /// Full step (no microstepping).
    #[default]
    Full = 0,
    /// Half step.
    Half = 1,
    /// Quarter step.
    Quarter = 2,
    /// Eighth step.
    Eighth = 3,
    /// Sixteenth step.
    Sixteenth = 4,
    /// Thirty-second step.
    ThirtySecond = 5,
}

impl MicrostepMode {
    /// Select-line levels `[M0, M1, M2]` for each mode, indexed by discriminant.
    const SELECT_LINES: [[bool; 3]; 6] = [
        [false, false, false],
        [true, false, false],
        [false, true, false],
        [true, true, false],
        [false, false, true],
        [true, false, true],
    ];

    /// All modes, finest last.
    pub const ALL: [Self; 6] = [
        Self::Full,
        Self::Half,
        Self::Quarter,
        Self::Eighth,
        Self::Sixteenth,
        Self::ThirtySecond,
    ];

    /// Decode a raw 3-bit select code.
    ///
    /// Bits above the third are ignored. Codes 6 and 7 select 1/32 stepping
    /// on the driver, so they decode to [`MicrostepMode::ThirtySecond`].
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::Full,
            1 => Self::Half,
            2 => Self::Quarter,
            3 => Self::Eighth,
            4 => Self::Sixteenth,
            _ => Self::ThirtySecond,
        }
    }

    /// Create from a step divisor (1, 2, 4, 8, 16, 32).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` for any other divisor.
    pub fn from_divisor(divisor: u16) -> Result<Self, ConfigError> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.divisor() == divisor)
            .ok_or(ConfigError::InvalidMicrosteps(divisor))
    }

    /// The 3-bit select code.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Sub-steps per full step.
    #[inline]
    pub const fn divisor(self) -> u16 {
        1 << (self as u16)
    }

    /// Levels for the select lines, ordered `[M0, M1, M2]` (least significant first).
    #[inline]
    pub fn select_levels(self) -> [bool; 3] {
        Self::SELECT_LINES[self as usize]
    }
}

impl TryFrom<u16> for MicrostepMode {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_divisor(value)
    }
}

impl<'de> Deserialize<'de> for MicrostepMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        MicrostepMode::from_divisor(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
