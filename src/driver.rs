//! Top-level CDTV IR transmitter driver.
//!
//! [`CdtvDriver`] ties the pipeline together: one call to
//! [`service`](CdtvDriver::service) runs sample → idle gate → encode →
//! transmit, synchronously and without preemption. The carrier modulator
//! busy-waits through the whole frame, so the invocation that handles a
//! tick also occupies the period until the next tick is due — there is
//! exactly one in-flight frame by construction and no shared transmission
//! state to lock.
//!
//! ## Example
//!
//! ```ignore
//! static FRAME_TICK: TickFlag = TickFlag::new();
//!
//! // in the timer interrupt handler:
//! FRAME_TICK.raise();
//!
//! // main loop:
//! let mut driver = CdtvDriver::new(sampler, carrier, Some(status_led));
//! let _timer = driver.start(&mut timer)?;
//! loop {
//!     wait_for_interrupt();
//!     driver.service_if_due(&FRAME_TICK)?;
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::carrier::IrCarrier;
use crate::consts::MAX_IDLE_FRAMES;
use crate::encoder::encode_frame;
use crate::joystick::JoystickSnapshot;
use crate::sampler::{InputBank, JoystickSampler};
use crate::scheduler::{InitError, PeriodicTimer, arm_frame_timer};
#[cfg(feature = "timer-isr")]
use crate::scheduler::TickFlag;

/// Gate deciding whether a snapshot's frame goes on the air.
///
/// Counts consecutive idle snapshots; any active snapshot resets the count.
/// A frame is transmitted while the count stays below the threshold, so the
/// receiver sees a short burst of trailing idle frames after the last real
/// input and can detect release, after which the emitter goes dark instead
/// of radiating an idle pattern forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleGate {
    idle_frames: u32,
    threshold: u32,
}

impl IdleGate {
    /// A fresh gate suppressing from the `threshold`-th consecutive idle
    /// snapshot onward.
    pub const fn new(threshold: u32) -> Self {
        Self {
            idle_frames: 0,
            threshold,
        }
    }

    /// Feeds one snapshot through the gate; returns whether its frame
    /// should be transmitted.
    pub fn observe(&mut self, snapshot: JoystickSnapshot) -> bool {
        if snapshot.is_idle() {
            self.idle_frames = self.idle_frames.saturating_add(1);
        } else {
            self.idle_frames = 0;
        }
        self.idle_frames < self.threshold
    }

    /// Current run of consecutive idle snapshots.
    pub const fn idle_frames(&self) -> u32 {
        self.idle_frames
    }
}

impl Default for IdleGate {
    fn default() -> Self {
        Self::new(MAX_IDLE_FRAMES)
    }
}

/// What one serviced tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum FrameOutcome {
    /// The snapshot's frame went out on the carrier.
    Transmitted(JoystickSnapshot),
    /// The snapshot was idle past the threshold; nothing was emitted.
    Suppressed(JoystickSnapshot),
}

/// CDTV joystick-to-IR transmitter.
///
/// Generic over the input bank, the PWM channel keying the IR LED, the
/// busy-wait delay source, and an optional status output pulsed once at
/// start-up.
#[derive(Debug)]
pub struct CdtvDriver<B, P, D, LED>
where
    B: InputBank,
    P: SetDutyCycle,
    D: DelayNs,
    LED: OutputPin,
{
    /// Joystick input sampler.
    pub sampler: JoystickSampler<B>,
    /// Carrier modulator driving the IR LED.
    pub carrier: IrCarrier<P, D>,
    led: Option<LED>,
    gate: IdleGate,
    /// Frames transmitted since construction.
    pub tx_frames: u32,
    /// Frames withheld by the idle gate since construction.
    pub suppressed_frames: u32,
}

impl<B, P, D, LED> CdtvDriver<B, P, D, LED>
where
    B: InputBank,
    P: SetDutyCycle,
    D: DelayNs,
    LED: OutputPin,
{
    /// Assembles a driver from its sampler, carrier, and optional status
    /// output.
    pub fn new(sampler: JoystickSampler<B>, carrier: IrCarrier<P, D>, led: Option<LED>) -> Self {
        Self {
            sampler,
            carrier,
            led,
            gate: IdleGate::new(MAX_IDLE_FRAMES),
            tx_frames: 0,
            suppressed_frames: 0,
        }
    }

    /// Arms the frame timer and signals readiness on the status output.
    ///
    /// Fatal on failure: a driver whose timer did not arm must not be
    /// serviced. Keep the returned handle alive for as long as frames
    /// should flow.
    pub fn start<T: PeriodicTimer>(&mut self, timer: &mut T) -> Result<T::Handle, InitError> {
        let handle = arm_frame_timer(timer)?;

        // Blink once so the operator can tell bring-up succeeded.
        if let Some(ref mut led) = self.led {
            let _ = led.set_high();
            self.carrier.delay.delay_ms(500);
            let _ = led.set_low();
        }
        Ok(handle)
    }

    /// Runs one full frame cycle: sample, gate, encode, transmit.
    ///
    /// Call once per scheduler tick. Busy-waits for the whole frame when
    /// the gate passes; returns immediately when it suppresses.
    pub fn service(&mut self) -> Result<FrameOutcome, P::Error> {
        let snapshot = self.sampler.sample();

        if self.gate.observe(snapshot) {
            let frame = encode_frame(snapshot);
            self.carrier.transmit(&frame)?;
            self.tx_frames += 1;
            Ok(FrameOutcome::Transmitted(snapshot))
        } else {
            self.suppressed_frames += 1;
            Ok(FrameOutcome::Suppressed(snapshot))
        }
    }

    /// Services a frame if the scheduler has marked one due.
    ///
    /// The main-loop entry point for interrupt-driven operation: wake,
    /// call this, go back to waiting.
    #[cfg(feature = "timer-isr")]
    pub fn service_if_due(&mut self, tick: &TickFlag) -> Result<Option<FrameOutcome>, P::Error> {
        if tick.take() {
            self.service().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Non-blocking variant of [`service_if_due`](CdtvDriver::service_if_due)
    /// for `nb`-style poll loops.
    #[cfg(feature = "timer-isr")]
    pub fn wait_frame(&mut self, tick: &TickFlag) -> nb::Result<FrameOutcome, P::Error> {
        if !tick.take() {
            return Err(nb::Error::WouldBlock);
        }
        self.service().map_err(nb::Error::Other)
    }
}
