//! # cdtv-ir
//!
//! A portable, no_std Rust driver that turns two 6-button digital joysticks
//! into the Commodore CDTV infrared remote bitstream, keying a 40 kHz
//! carrier through an IR LED.
//!
//! This driver implements the transmit side of the CDTV joystick protocol
//! using:
//! - `embedded-hal` traits for the PWM carrier, busy-wait timing, and the
//!   status output
//! - small capability traits for the pieces `embedded-hal` does not cover:
//!   a one-shot input-bank read and a repeating frame timer
//! - an interrupt-safe frame-due flag built on `critical-section`
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` and replaces `heapless::Vec` with `std::vec::Vec` (host testing) |
//! | `timer-isr` (default) | Frame cadence from a repeating timer ISR via [`scheduler::TickFlag`] |
//! | `delay-loop`          | Blocking fallback loop paced by `embedded_hal::delay::DelayNs` |
//! | `defmt-0-3`           | `defmt` logging and `Format` derives |
//! | `log`                 | `log` logging |
//!
//! ## Protocol
//!
//! Every ~24.15 ms one frame goes out: a header pulse, a fixed zero
//! identifier bit, the 12 joystick bits most-significant first, and their
//! bitwise complement as check bits. Bits are pulse-duration modulated and
//! both bit types occupy the same 875 µs slot, so the frame period is
//! constant and schedulable at a fixed rate. When the sticks go idle, a
//! short burst of trailing idle frames is sent and then the emitter goes
//! dark until the next input.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cdtv_ir::carrier::IrCarrier;
//! use cdtv_ir::driver::CdtvDriver;
//! use cdtv_ir::sampler::{CDTV_PICO_PINS, JoystickSampler};
//!
//! init_frame_tick!();
//!
//! let sampler = JoystickSampler::new(bank, CDTV_PICO_PINS);
//! let carrier = IrCarrier::new(pwm, delay);
//! let mut driver = CdtvDriver::new(sampler, carrier, Some(led));
//! let _timer = driver.start(&mut timer)?;
//!
//! loop {
//!     wfi();
//!     service_frame!(driver)?;
//! }
//! ```
//!
//! ## Integration Notes
//!
//! - Transmission busy-waits for the full frame; the servicing call owns
//!   the processor until the frame ends. Keep it that way on platforms
//!   with a scheduler, or receiver-side pulse timing will drift.
//! - The timer ISR must only raise the flag; all work happens in the main
//!   loop.
//! - All timings and the channel order are fixed at build time; they are
//!   protocol commitments, not configuration.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded
//! environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod carrier;
pub mod consts;
pub mod driver;
pub mod encoder;
pub mod joystick;
pub mod sampler;
pub mod scheduler;
pub mod timer;
