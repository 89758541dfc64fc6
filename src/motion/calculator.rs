//! Per-step delay computation.
//!
//! Step periods follow cosine curves between the configured maximum and
//! minimum delays. Long moves use a half-cosine for each ramp with a
//! constant cruise in between; moves too short to reach cruise use one full
//! cosine period over the whole move, raised by an amplitude correction so
//! the fastest pulse never drops below a usable width.
//!
//! All values returned are half periods in microseconds: the time the step
//! line is held high, and then again held low.

use core::f64::consts::PI;

use libm::cos;

use crate::config::RampParameters;
use crate::error::MotionError;

/// Fraction of the short-move envelope floor pulled toward 1 us.
pub const AMPLITUDE_CORRECTION: f64 = 0.3;

/// Which ramp of a long move a segment describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampKind {
    /// Speeding up from rest.
    Acceleration,
    /// Slowing back down to rest.
    Deceleration,
}

impl RampKind {
    /// Lowercase name for messages.
    pub fn name(self) -> &'static str {
        match self {
            RampKind::Acceleration => "acceleration",
            RampKind::Deceleration => "deceleration",
        }
    }
}

/// Truncate a non-negative float delay to whole microseconds.
#[inline]
fn to_us(delay: f64) -> u32 {
    if delay <= 0.0 {
        0
    } else {
        delay as u32
    }
}

/// One cosine ramp of a long move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampSegment {
    kind: RampKind,
    len: u32,
    magnitude: f64,
    offset: f64,
}

impl RampSegment {
    /// Acceleration ramp over `ramp.accel_steps` steps.
    ///
    /// # Errors
    ///
    /// `MotionError::ZeroLengthRamp` if the ramp has no steps.
    pub fn acceleration(ramp: &RampParameters) -> Result<Self, MotionError> {
        Self::new(RampKind::Acceleration, ramp.accel_steps, ramp)
    }

    /// Deceleration ramp over `ramp.decel_steps` steps.
    ///
    /// # Errors
    ///
    /// `MotionError::ZeroLengthRamp` if the ramp has no steps.
    pub fn deceleration(ramp: &RampParameters) -> Result<Self, MotionError> {
        Self::new(RampKind::Deceleration, ramp.decel_steps, ramp)
    }

    fn new(kind: RampKind, len: u32, ramp: &RampParameters) -> Result<Self, MotionError> {
        if len == 0 {
            return Err(MotionError::ZeroLengthRamp(kind));
        }
        Ok(Self {
            kind,
            len,
            magnitude: ramp.delay_magnitude(),
            offset: ramp.delay_offset(),
        })
    }

    /// Ramp direction.
    #[inline]
    pub fn kind(&self) -> RampKind {
        self.kind
    }

    /// Number of steps in the ramp.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Always false; zero-length ramps cannot be built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Half period for the step at `index` within the ramp.
    ///
    /// Acceleration walks the cosine from 0 to π (delay falling from the
    /// maximum toward the minimum); deceleration walks it from π to 2π.
    /// Indices past the end continue the curve rather than panic.
    pub fn delay_us(&self, index: u32) -> u32 {
        let len = self.len as f64;
        let phase = match self.kind {
            RampKind::Acceleration => PI * index as f64 / len,
            RampKind::Deceleration => PI * (index as f64 + len) / len,
        };
        to_us((self.magnitude * cos(phase) + self.offset) / 2.0)
    }
}

/// Single cosine envelope spanning a short move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortEnvelope {
    steps: u32,
    magnitude: f64,
    offset: f64,
}

impl ShortEnvelope {
    /// Build the envelope for a move of `steps` steps.
    ///
    /// The envelope floor is derived from how far an acceleration ramp of
    /// `ramp.accel_steps` would get in half the move, then lifted by
    /// [`AMPLITUDE_CORRECTION`].
    ///
    /// # Errors
    ///
    /// `MotionError::ZeroLengthRamp` when there is no acceleration ramp to
    /// scale against, `MotionError::IndexOutOfRange` when `steps == 0`.
    pub fn new(steps: u32, ramp: &RampParameters) -> Result<Self, MotionError> {
        if ramp.accel_steps == 0 {
            return Err(MotionError::ZeroLengthRamp(RampKind::Acceleration));
        }
        if steps == 0 {
            return Err(MotionError::IndexOutOfRange { index: 0, len: 0 });
        }

        let c = AMPLITUDE_CORRECTION;
        let reach = PI * steps as f64 / (2.0 * ramp.accel_steps as f64);
        let min_amplitude =
            (1.0 - c) * (ramp.delay_magnitude() * cos(reach) + ramp.delay_offset()) + c;
        let max = ramp.max_delay_us as f64;

        Ok(Self {
            steps,
            magnitude: (max - min_amplitude) / 2.0,
            offset: (max + min_amplitude) / 2.0,
        })
    }

    /// Number of steps the envelope spans.
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Shortest full period reached at the middle of the move.
    #[inline]
    pub fn min_amplitude(&self) -> f64 {
        self.offset - self.magnitude
    }

    /// Half period for the step at `index`.
    pub fn delay_us(&self, index: u32) -> u32 {
        let phase = 2.0 * PI * index as f64 / self.steps as f64;
        to_us((self.magnitude * cos(phase) + self.offset) / 2.0)
    }
}

/// Half period during cruise.
#[inline]
pub fn cruise_delay_us(ramp: &RampParameters) -> u32 {
    ramp.min_delay_us / 2
}

/// Half period for acceleration step `index`.
///
/// # Errors
///
/// Rejects a zero-length ramp and an index at or past the ramp's end.
pub fn acceleration_delay_us(index: u32, ramp: &RampParameters) -> Result<u32, MotionError> {
    let segment = RampSegment::acceleration(ramp)?;
    check_index(index, segment.len())?;
    Ok(segment.delay_us(index))
}

/// Half period for deceleration step `index`.
///
/// # Errors
///
/// Rejects a zero-length ramp and an index at or past the ramp's end.
pub fn deceleration_delay_us(index: u32, ramp: &RampParameters) -> Result<u32, MotionError> {
    let segment = RampSegment::deceleration(ramp)?;
    check_index(index, segment.len())?;
    Ok(segment.delay_us(index))
}

/// Half period for step `index` of a short move of `steps` steps.
///
/// # Errors
///
/// See [`ShortEnvelope::new`]; also rejects `index >= steps`.
pub fn short_move_delay_us(
    index: u32,
    steps: u32,
    ramp: &RampParameters,
) -> Result<u32, MotionError> {
    let envelope = ShortEnvelope::new(steps, ramp)?;
    check_index(index, steps)?;
    Ok(envelope.delay_us(index))
}

fn check_index(index: u32, len: u32) -> Result<(), MotionError> {
    if index >= len {
        Err(MotionError::IndexOutOfRange { index, len })
    } else {
        Ok(())
    }
}
