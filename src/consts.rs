//! Constants for the CDTV infrared joystick protocol.
//!
//! This module is the timing table: every duration, the carrier parameters,
//! and the frame geometry are fixed here at build time and never mutated.
//! The values encode one specific legacy protocol variant; changing the
//! channel count, bit order, or any duration is a receiver compatibility
//! decision, not a tuning knob.
//!
//! ## Key Concepts
//!
//! - **Carrier**: 40 kHz square wave at 33% duty, gated on/off per bit.
//! - **Pulse-duration modulation**: a zero bit is a short mark and a long
//!   space, a one bit is a long mark and a shorter space. Both slot types
//!   last 875 µs, which is what makes the frame period deterministic.
//! - **Frame geometry**: header, one fixed zero identifier bit, 12 data
//!   bits, 12 complement check bits, then the inter-frame gap.
//!
//! All durations are whole multiples of the 25 µs carrier period.

/// Carrier frequency of the modulated IR output.
///
/// 40 kHz gives a 25 µs carrier period; every protocol duration below is a
/// multiple of it.
pub const IR_CARRIER_HZ: u32 = 40_000;

/// Carrier duty cycle, percent. The CDTV CD1252 mouse keys its carrier at
/// 33% as well.
pub const IR_DUTY_CYCLE_PERCENT: u8 = 33;

/// Mask selecting the 12 valid data bits of a snapshot.
pub const DATA_MASK: u16 = 0x0fff;

/// Header mark duration (44 carrier periods).
pub const IR_HDR_MARK_US: u32 = 1_100;

/// Header space duration (15 carrier periods).
pub const IR_HDR_SPACE_US: u32 = 375;

/// Zero-bit mark duration (6 carrier periods).
pub const IR_ZERO_MARK_US: u32 = 150;

/// Zero-bit space duration (29 carrier periods).
pub const IR_ZERO_SPACE_US: u32 = 725;

/// One-bit mark duration (20 carrier periods).
pub const IR_ONE_MARK_US: u32 = 500;

/// One-bit space duration (15 carrier periods).
pub const IR_ONE_SPACE_US: u32 = 375;

/// Silence between the last check bit and the next header (32 carrier
/// periods). Provided by the frame cadence, never emitted as a pulse.
pub const IR_INTERFRAME_GAP_US: u32 = 800;

/// Number of joystick channels carried by one frame.
pub const CHANNEL_COUNT: usize = 12;

/// Mark/space slots per frame: one header slot plus 25 encoded bits
/// (identifier + 12 data + 12 check).
pub const FRAME_SLOT_COUNT: usize = 26;

/// Consecutive idle snapshots transmitted before suppression kicks in.
///
/// A short trailing burst of idle frames lets the receiver detect release;
/// from the fourth consecutive idle snapshot on, nothing is sent.
pub const MAX_IDLE_FRAMES: u32 = 4;

/// Nominal frame period in microseconds: ~24 150 µs.
///
/// The data and check fields are bitwise complements, so every frame carries
/// exactly 13 zero bits (identifier included) and 12 one bits regardless of
/// the snapshot value. Zero and one slots are equal length, which pins the
/// period to this constant.
pub const FRAME_PERIOD_US: u64 = (IR_HDR_MARK_US
    + IR_HDR_SPACE_US
    + 13 * (IR_ZERO_MARK_US + IR_ZERO_SPACE_US)
    + 12 * (IR_ONE_MARK_US + IR_ONE_SPACE_US)
    + IR_INTERFRAME_GAP_US) as u64;
