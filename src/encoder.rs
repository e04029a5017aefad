//! Bit-level encoding of joystick snapshots into IR pulse sequences.
//!
//! A frame is an ordered list of mark/space slots: one header, one fixed
//! zero identifier bit, the 12 data bits most-significant first, then the 12
//! check bits (bitwise complement of the data) in the same order. Bits are
//! pulse-duration modulated — the mark length distinguishes zero from one —
//! and both bit slots have the same total length, so every frame occupies
//! the same time on the wire.
//!
//! No trailer is emitted. The inter-frame silence the protocol needs comes
//! from the gap between the end of the last check bit and the next
//! scheduled frame; see [`crate::consts::IR_INTERFRAME_GAP_US`].
//!
//! Encoding is a total function over the 12-bit snapshot space and cannot
//! fail. The check bits exist purely for receiver-side error detection; a
//! check failure on the far end does not trigger any retransmission here.

#[cfg(not(feature = "std"))]
use crate::consts::FRAME_SLOT_COUNT;
use crate::consts::{
    CHANNEL_COUNT, DATA_MASK, IR_HDR_MARK_US, IR_HDR_SPACE_US, IR_ONE_MARK_US, IR_ONE_SPACE_US,
    IR_ZERO_MARK_US, IR_ZERO_SPACE_US,
};
use crate::joystick::JoystickSnapshot;

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// One carrier-on/carrier-off slot, durations in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Pulse {
    /// Carrier-on duration.
    pub mark_us: u32,
    /// Carrier-off duration that follows the mark.
    pub space_us: u32,
}

impl Pulse {
    /// The frame header slot.
    pub const HEADER: Pulse = Pulse {
        mark_us: IR_HDR_MARK_US,
        space_us: IR_HDR_SPACE_US,
    };

    /// A zero bit: short mark, long space.
    pub const ZERO: Pulse = Pulse {
        mark_us: IR_ZERO_MARK_US,
        space_us: IR_ZERO_SPACE_US,
    };

    /// A one bit: long mark, shorter space.
    pub const ONE: Pulse = Pulse {
        mark_us: IR_ONE_MARK_US,
        space_us: IR_ONE_SPACE_US,
    };

    /// Total slot length in microseconds.
    pub const fn duration_us(self) -> u32 {
        self.mark_us + self.space_us
    }

    const fn bit(value: bool) -> Pulse {
        if value { Pulse::ONE } else { Pulse::ZERO }
    }
}

/// The ordered pulse list for one transmitted frame.
#[cfg(not(feature = "std"))]
pub type Frame = Vec<Pulse, FRAME_SLOT_COUNT>;

/// The ordered pulse list for one transmitted frame.
#[cfg(feature = "std")]
pub type Frame = Vec<Pulse>;

/// Check field for a 12-bit data value: the bitwise complement, masked back
/// to 12 bits.
pub const fn check_bits(data: u16) -> u16 {
    !data & DATA_MASK
}

/// Encodes a snapshot into its full frame pulse sequence.
///
/// The result always holds [`FRAME_SLOT_COUNT`](crate::consts::FRAME_SLOT_COUNT)
/// slots: header, identifier zero bit, data bits 11 down to 0, check bits
/// 11 down to 0.
pub fn encode_frame(snapshot: JoystickSnapshot) -> Frame {
    let data = snapshot.bits();
    let check = check_bits(data);

    let mut pulses = Frame::new();
    let _ = pulses.push(Pulse::HEADER);

    // Joystick identifier bit, always zero.
    let _ = pulses.push(Pulse::ZERO);

    for i in (0..CHANNEL_COUNT).rev() {
        let _ = pulses.push(Pulse::bit(data & (1 << i) != 0));
    }
    for i in (0..CHANNEL_COUNT).rev() {
        let _ = pulses.push(Pulse::bit(check & (1 << i) != 0));
    }

    pulses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_PERIOD_US, FRAME_SLOT_COUNT, IR_INTERFRAME_GAP_US};

    /// Reads the data field back out of an encoded frame.
    fn decode_data_bits(frame: &Frame) -> u16 {
        let mut value = 0u16;
        for pulse in &frame[2..2 + CHANNEL_COUNT] {
            value = (value << 1) | u16::from(*pulse == Pulse::ONE);
        }
        value
    }

    #[test]
    fn test_frame_has_fixed_slot_count() {
        for value in [0x000, 0x001, 0x800, 0xfff, 0xa5a] {
            let frame = encode_frame(JoystickSnapshot::new(value));
            assert_eq!(frame.len(), FRAME_SLOT_COUNT);
            assert_eq!(frame[0], Pulse::HEADER);
            assert_eq!(frame[1], Pulse::ZERO); // identifier bit
        }
    }

    #[test]
    fn test_check_bits_complement_data() {
        assert_eq!(check_bits(0x000), 0xfff);
        assert_eq!(check_bits(0xfff), 0x000);
        assert_eq!(check_bits(0xa5a), 0x5a5);
        for value in 0u16..=0xfff {
            assert_eq!(check_bits(value), !value & 0x0fff);
        }
    }

    #[test]
    fn test_data_and_check_fields_on_the_wire() {
        let frame = encode_frame(JoystickSnapshot::new(0x801));
        // Data MSB first: bit 11 and bit 0 set.
        assert_eq!(frame[2], Pulse::ONE);
        assert_eq!(frame[13], Pulse::ONE);
        assert!(frame[3..13].iter().all(|p| *p == Pulse::ZERO));
        // Check field is the complement, MSB first.
        assert_eq!(frame[14], Pulse::ZERO);
        assert_eq!(frame[25], Pulse::ZERO);
        assert!(frame[15..25].iter().all(|p| *p == Pulse::ONE));
    }

    #[test]
    fn test_encoding_is_injective() {
        // Every 12-bit value must survive a round trip through its own
        // frame, which rules out any two values sharing a pulse sequence.
        for value in 0u16..=0xfff {
            let frame = encode_frame(JoystickSnapshot::new(value));
            assert_eq!(decode_data_bits(&frame), value);
        }
    }

    #[test]
    fn test_bit_slots_have_equal_duration() {
        assert_eq!(Pulse::ZERO.duration_us(), Pulse::ONE.duration_us());
    }

    #[test]
    fn test_frame_duration_is_constant() {
        for value in 0u16..=0xfff {
            let frame = encode_frame(JoystickSnapshot::new(value));
            let active: u64 = frame.iter().map(|p| p.duration_us() as u64).sum();
            assert_eq!(active + IR_INTERFRAME_GAP_US as u64, FRAME_PERIOD_US);
        }
    }
}
