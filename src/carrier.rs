//! On-off keyed carrier output for the IR emitter.
//!
//! The IR LED is driven by a hardware PWM channel running the 40 kHz
//! carrier continuously; keying happens by switching the channel's compare
//! level between the 33% duty point and zero. [`IrCarrier`] owns that
//! channel through [`embedded_hal::pwm::SetDutyCycle`] plus a
//! [`DelayNs`](embedded_hal::delay::DelayNs) busy-wait source.
//!
//! Mark and space durations are busy-waited on purpose: the modulator owns
//! the processor for the whole of every emitted bit. CDTV receivers sit on
//! tight pulse tolerances, and handing the wait to a general-purpose
//! scheduler would add jitter the protocol cannot absorb. Integrators
//! re-targeting a platform with an OS must keep transmission atomic and
//! non-preemptible (a dedicated high-priority context or equivalent).

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::consts::IR_DUTY_CYCLE_PERCENT;
use crate::encoder::{Frame, Pulse};

/// Derives the PWM wrap value and compare level for the IR carrier from the
/// timing hardware's tick rate.
///
/// # Arguments
/// - `clock_hz`: input clock of the PWM slice (e.g. 125 MHz on the RP2040)
/// - `carrier_hz`: carrier frequency, normally
///   [`IR_CARRIER_HZ`](crate::consts::IR_CARRIER_HZ)
///
/// # Returns
/// - wrap value (ticks per carrier period, minus one)
/// - compare level for the fixed 33% duty point
pub fn carrier_divider(clock_hz: u32, carrier_hz: u32) -> (u16, u16) {
    let wrap = libm::round(clock_hz as f64 / carrier_hz as f64) as u32 - 1;
    let level = wrap * IR_DUTY_CYCLE_PERCENT as u32 / 100;
    (wrap as u16, level as u16)
}

/// Compile-time variant of [`carrier_divider`].
pub const fn const_carrier_divider(clock_hz: u32, carrier_hz: u32) -> (u16, u16) {
    let wrap = (clock_hz + carrier_hz / 2) / carrier_hz - 1;
    let level = wrap * IR_DUTY_CYCLE_PERCENT as u32 / 100;
    (wrap as u16, level as u16)
}

/// Carrier modulator: realizes mark/space pulses on a PWM-driven IR LED.
///
/// The duty compare level is derived once at construction from the
/// channel's `max_duty_cycle()` and never recomputed; the carrier
/// parameters are fixed for the life of the process.
#[derive(Debug)]
pub struct IrCarrier<P: SetDutyCycle, D: DelayNs> {
    pwm: P,
    pub(crate) delay: D,
    level: u16,
}

impl<P: SetDutyCycle, D: DelayNs> IrCarrier<P, D> {
    /// Wraps a configured PWM channel and busy-wait delay source.
    ///
    /// The channel must already run at the carrier frequency (see
    /// [`carrier_divider`] for the slice setup arithmetic). The output is
    /// forced off here so the LED idles dark.
    pub fn new(mut pwm: P, delay: D) -> Self {
        let level =
            (pwm.max_duty_cycle() as u32 * IR_DUTY_CYCLE_PERCENT as u32 / 100) as u16;
        let _ = pwm.set_duty_cycle(0); // Ensure idle
        Self { pwm, delay, level }
    }

    /// The compare level used for carrier-on, for inspection in tests and
    /// bring-up checks.
    pub fn duty_level(&self) -> u16 {
        self.level
    }

    /// Releases the PWM channel and delay source.
    pub fn into_parts(self) -> (P, D) {
        (self.pwm, self.delay)
    }

    /// Emits one slot: carrier on for the mark, fully off for the space.
    ///
    /// Busy-waits for the entire slot duration.
    pub fn emit(&mut self, pulse: Pulse) -> Result<(), P::Error> {
        self.pwm.set_duty_cycle(self.level)?;
        self.delay.delay_us(pulse.mark_us);

        self.pwm.set_duty_cycle(0)?;
        self.delay.delay_us(pulse.space_us);
        Ok(())
    }

    /// Emits every slot of a frame back to back.
    ///
    /// The carrier is off when this returns; the inter-frame gap is the
    /// caller's cadence, not an emitted pulse.
    pub fn transmit(&mut self, frame: &Frame) -> Result<(), P::Error> {
        for pulse in frame.iter() {
            self.emit(*pulse)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::pwm::{Mock as PwmMock, Transaction as PwmTransaction};

    #[test]
    fn test_carrier_divider_from_pico_clock() {
        // 125 MHz system clock, 40 kHz carrier: 3125 ticks per period.
        assert_eq!(carrier_divider(125_000_000, 40_000), (3124, 1030));
        assert_eq!(const_carrier_divider(125_000_000, 40_000), (3124, 1030));
    }

    #[test]
    fn test_duty_level_derived_once_at_construction() {
        let pwm = PwmMock::new(&[
            PwmTransaction::max_duty_cycle(3124),
            PwmTransaction::set_duty_cycle(0),
        ]);
        let carrier = IrCarrier::new(pwm, NoopDelay);
        assert_eq!(carrier.duty_level(), 1030);

        carrier.into_parts().0.done();
    }

    #[test]
    fn test_emit_keys_carrier_on_then_off() {
        let pwm = PwmMock::new(&[
            PwmTransaction::max_duty_cycle(1000),
            PwmTransaction::set_duty_cycle(0),
            PwmTransaction::set_duty_cycle(330),
            PwmTransaction::set_duty_cycle(0),
        ]);
        let mut carrier = IrCarrier::new(pwm, NoopDelay);
        carrier.emit(Pulse::HEADER).unwrap();

        carrier.into_parts().0.done();
    }

    #[test]
    fn test_transmit_emits_every_slot_in_order() {
        let mut frame = Frame::new();
        let _ = frame.push(Pulse::HEADER);
        let _ = frame.push(Pulse::ONE);
        let _ = frame.push(Pulse::ZERO);

        let mut expected = vec![
            PwmTransaction::max_duty_cycle(1000),
            PwmTransaction::set_duty_cycle(0),
        ];
        for _ in 0..frame.len() {
            expected.push(PwmTransaction::set_duty_cycle(330));
            expected.push(PwmTransaction::set_duty_cycle(0));
        }

        let pwm = PwmMock::new(&expected);
        let mut carrier = IrCarrier::new(pwm, NoopDelay);
        carrier.transmit(&frame).unwrap();

        carrier.into_parts().0.done();
    }
}
