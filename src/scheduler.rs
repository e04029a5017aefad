//! Fixed-rate frame scheduling.
//!
//! One frame leaves the transmitter every [`FRAME_PERIOD_US`] microseconds.
//! The cadence comes from a hardware repeating timer armed once at start-up
//! through the [`PeriodicTimer`] capability; fixed-rate means each firing
//! time derives from the previous *nominal* firing time, so processing
//! jitter or an occasional overrun never accumulates drift across frames.
//! Hardware repeating timers give exactly that; re-arming a one-shot from
//! the completion of the previous frame would not.
//!
//! The interrupt side of the scheduler does one thing: it raises a
//! [`TickFlag`]. All sampling, encoding and transmission happen in the main
//! loop, which waits for an interrupt and consumes the flag. If the timer
//! cannot be armed the process has lost its one guarantee — a steady frame
//! cadence — and initialization fails fatally; there is no ad-hoc
//! transmission fallback.

#[cfg(feature = "timer-isr")]
use core::cell::Cell;
#[cfg(feature = "timer-isr")]
use critical_section::Mutex;

use crate::consts::FRAME_PERIOD_US;

/// Capability for arming a repeating hardware timer.
///
/// Implementations wrap the platform's periodic-interrupt source (RP2040
/// repeating timer, SysTick, a timer peripheral in auto-reload mode). The
/// armed timer must fire at the nominal period without accumulating drift.
pub trait PeriodicTimer {
    /// Token keeping the armed timer alive, if the platform needs one.
    type Handle;
    /// Platform-specific arming failure.
    type Error;

    /// Arms the timer to fire every `period_us` microseconds from now on.
    fn arm_periodic(&mut self, period_us: u64) -> Result<Self::Handle, Self::Error>;
}

/// Errors raised during driver initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum InitError {
    /// The periodic frame timer could not be armed. Fatal: the driver must
    /// not operate with unscheduled transmission.
    #[error("frame timer could not be armed")]
    TimerArm,
}

/// Arms the frame timer at the protocol period.
///
/// This is the single fallible step of bring-up. The returned handle must
/// be kept alive for as long as frames should flow.
pub fn arm_frame_timer<T: PeriodicTimer>(timer: &mut T) -> Result<T::Handle, InitError> {
    match timer.arm_periodic(FRAME_PERIOD_US) {
        Ok(handle) => {
            #[cfg(feature = "log")]
            log::info!("frame timer armed, period {} us", FRAME_PERIOD_US);
            #[cfg(feature = "defmt-0-3")]
            defmt::info!("frame timer armed, period {} us", FRAME_PERIOD_US);
            Ok(handle)
        }
        Err(_) => {
            #[cfg(feature = "log")]
            log::error!("failed to arm frame timer");
            #[cfg(feature = "defmt-0-3")]
            defmt::error!("failed to arm frame timer");
            Err(InitError::TimerArm)
        }
    }
}

/// Frame-due flag shared between the timer interrupt and the main loop.
///
/// The interrupt handler calls [`raise`](TickFlag::raise) and nothing else;
/// the main loop calls [`take`](TickFlag::take) after waking. A flag, not a
/// counter: ticks that land while a frame is still being transmitted
/// coalesce, which is the intended behavior for a transmitter that can only
/// have one frame in flight.
///
/// Interior mutability goes through a `critical_section` mutex so the type
/// stays sound on targets without atomic read-modify-write.
#[cfg(feature = "timer-isr")]
pub struct TickFlag(Mutex<Cell<bool>>);

#[cfg(feature = "timer-isr")]
impl TickFlag {
    /// A lowered flag, usable in `static` position.
    pub const fn new() -> Self {
        Self(Mutex::new(Cell::new(false)))
    }

    /// Marks a frame as due. Safe to call from interrupt context at any
    /// point, including mid-transmission.
    pub fn raise(&self) {
        critical_section::with(|cs| self.0.borrow(cs).set(true));
    }

    /// Consumes the flag, returning whether a frame was due.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.0.borrow(cs).replace(false))
    }
}

#[cfg(feature = "timer-isr")]
impl Default for TickFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "timer-isr")]
impl core::fmt::Debug for TickFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("TickFlag(..)")
    }
}
