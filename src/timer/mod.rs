//! Timer arithmetic and frame-loop utilities.
//!
//! Logic for pacing the transmitter. Two approaches are supported: a
//! hardware repeating timer whose ISR raises the frame-due flag
//! (`timer-isr` feature, the fixed-rate mode the protocol wants), or a
//! blocking delay loop for platforms without a usable timer interrupt
//! (`delay-loop` feature, an approximation that paces from frame
//! completion rather than from nominal firing times).
//!
//! Contains helpers for both modes:
//! - [`compute_frame_ticks`]: runtime tick-count calculator for arming a
//!   timer whose tick rate is not 1 MHz
//! - [`const_frame_ticks`]: compile-time variant
//! - [`run_frame_loop`]: blocking fallback loop (feature `delay-loop`)
//! - `global_tick_flag_init`, `global_frame_tick` and the
//!   `init_frame_tick!` / `raise_frame_tick!` / `service_frame!` macros
//!   (feature `timer-isr`)

use libm::round;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

use crate::consts::FRAME_PERIOD_US;

/// Microseconds per second, for tick-rate conversions.
pub const MICROS_PER_SECOND: u64 = 1_000_000;

/// Computes how many timer ticks make up one frame period.
///
/// # Arguments
/// - `timer_hz`: tick rate of the timer being armed (e.g. 1 MHz for the
///   RP2040 system timer)
///
/// # Returns
/// - Tick count to load as the repeating period (rounds to nearest)
pub fn compute_frame_ticks(timer_hz: u32) -> u64 {
    round(FRAME_PERIOD_US as f64 * timer_hz as f64 / MICROS_PER_SECOND as f64) as u64
}

/// Compile-time variant of [`compute_frame_ticks`].
pub const fn const_frame_ticks(timer_hz: u32) -> u64 {
    (FRAME_PERIOD_US * timer_hz as u64 + MICROS_PER_SECOND / 2) / MICROS_PER_SECOND
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_ticks_at_one_megahertz() {
        // A microsecond timer loads the period verbatim.
        assert_eq!(compute_frame_ticks(1_000_000), 24_150);
        assert_eq!(const_frame_ticks(1_000_000), 24_150);
    }

    #[test]
    fn test_frame_ticks_round_to_nearest() {
        // 32.768 kHz RTC tick: 24 150 µs * 32 768 / 1e6 = 791.3 ticks.
        assert_eq!(compute_frame_ticks(32_768), 791);
        assert_eq!(const_frame_ticks(32_768), 791);
    }
}
