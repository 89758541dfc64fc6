//! Cooperative cancellation for moves in progress.
//!
//! An [`AbortSignal`] is usually placed in a `static` so that an interrupt
//! handler (a limit switch, an e-stop button) can raise it while the
//! sequencer is busy stepping. The sequencer polls it once per step, so the
//! pulse in flight always completes.
//!
//! ```rust,ignore
//! static ABORT: AbortSignal = AbortSignal::new();
//!
//! fn limit_switch_irq() {
//!     ABORT.request_kill();
//! }
//!
//! let report = motor.execute_move(32_000, Direction::Forward, &ABORT)?;
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

/// Why a move ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbortKind {
    /// Graceful stop was requested.
    Stop,
    /// Forced kill was requested.
    Kill,
}

/// Pair of stop/kill flags shared between the sequencer and its interrupters.
///
/// Only plain loads and stores are used, so this works on cores without
/// atomic read-modify-write instructions.
#[derive(Debug, Default)]
pub struct AbortSignal {
    stop: AtomicBool,
    kill: AtomicBool,
}

impl AbortSignal {
    /// Create a signal with both flags lowered.
    pub const fn new() -> Self {
        Self {
            stop: AtomicBool::new(false),
            kill: AtomicBool::new(false),
        }
    }

    /// Request a graceful stop.
    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Request a forced kill.
    #[inline]
    pub fn request_kill(&self) {
        self.kill.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    #[inline]
    pub fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Whether a kill has been requested.
    #[inline]
    pub fn is_kill_requested(&self) -> bool {
        self.kill.load(Ordering::Acquire)
    }

    /// Read both flags; kill wins when both are raised.
    #[inline]
    pub fn poll(&self) -> Option<AbortKind> {
        if self.is_kill_requested() {
            Some(AbortKind::Kill)
        } else if self.is_stop_requested() {
            Some(AbortKind::Stop)
        } else {
            None
        }
    }

    /// Whether either flag is raised.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.poll().is_some()
    }

    /// Lower both flags.
    #[inline]
    pub fn clear(&self) {
        self.stop.store(false, Ordering::Release);
        self.kill.store(false, Ordering::Release);
    }
}
