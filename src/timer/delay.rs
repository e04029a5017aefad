use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::consts::{FRAME_PERIOD_US, IR_INTERFRAME_GAP_US};
use crate::driver::{CdtvDriver, FrameOutcome};
use crate::sampler::InputBank;

/// Runs a blocking loop that services one frame per period using the
/// driver's own delay source for pacing.
///
/// This is the fallback for integrations without a usable timer interrupt.
/// Pacing is fixed-delay, not fixed-rate: a transmitted frame busy-waits
/// its own duration and is followed by the inter-frame gap, a suppressed
/// frame is followed by a whole frame period. Small per-frame overheads
/// therefore accumulate instead of being absorbed by a hardware cadence —
/// acceptable for bench work, not the mode to ship.
///
/// # Notes
/// - Never returns except on a carrier error; it is intended for
///   single-purpose polling firmware.
/// - Prefer the `timer-isr` mode wherever a repeating timer exists.
pub fn run_frame_loop<B, P, D, LED>(
    driver: &mut CdtvDriver<B, P, D, LED>,
) -> Result<Infallible, P::Error>
where
    B: InputBank,
    P: SetDutyCycle,
    D: DelayNs,
    LED: OutputPin,
{
    loop {
        match driver.service()? {
            FrameOutcome::Transmitted(_) => {
                driver.carrier.delay.delay_us(IR_INTERFRAME_GAP_US);
            }
            FrameOutcome::Suppressed(_) => {
                driver.carrier.delay.delay_us(FRAME_PERIOD_US as u32);
            }
        }
    }
}
