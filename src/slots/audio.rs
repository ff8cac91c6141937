//! PCM sample buffers as slots.
//!
//! Audio decoders hand over interleaved samples; each sample is one slot.
//! Raw byte streams (`[u8]`) give 8-bit slots over the encoded frame bytes,
//! while `[i16]` gives one 16-bit slot per sample. Signed samples are
//! addressed through their two's-complement bit pattern, so the low bits of
//! `-1i16` are all ones.

use super::{Slots, SlotsMut};

impl Slots for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn width(&self) -> u8 {
        8
    }

    fn get(&self, index: usize) -> u16 {
        u16::from(self[index])
    }
}

impl SlotsMut for [u8] {
    fn set(&mut self, index: usize, value: u16) {
        self[index] = value as u8;
    }
}

impl Slots for [i8] {
    fn len(&self) -> usize {
        <[i8]>::len(self)
    }

    fn width(&self) -> u8 {
        8
    }

    fn get(&self, index: usize) -> u16 {
        u16::from(self[index] as u8)
    }
}

impl SlotsMut for [i8] {
    fn set(&mut self, index: usize, value: u16) {
        self[index] = value as u8 as i8;
    }
}

impl Slots for [u16] {
    fn len(&self) -> usize {
        <[u16]>::len(self)
    }

    fn width(&self) -> u8 {
        16
    }

    fn get(&self, index: usize) -> u16 {
        self[index]
    }
}

impl SlotsMut for [u16] {
    fn set(&mut self, index: usize, value: u16) {
        self[index] = value;
    }
}

impl Slots for [i16] {
    fn len(&self) -> usize {
        <[i16]>::len(self)
    }

    fn width(&self) -> u8 {
        16
    }

    fn get(&self, index: usize) -> u16 {
        self[index] as u16
    }
}

impl SlotsMut for [i16] {
    fn set(&mut self, index: usize, value: u16) {
        self[index] = value as i16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_samples_use_bit_pattern() {
        let mut samples = [-1i16, 0, i16::MIN];
        assert_eq!(Slots::get(samples.as_slice(), 0), 0xFFFF);
        assert_eq!(Slots::get(samples.as_slice(), 2), 0x8000);

        SlotsMut::set(samples.as_mut_slice(), 0, 0xFFFE);
        assert_eq!(samples[0], -2);
    }

    #[test]
    fn test_byte_slots_ignore_high_bits() {
        let mut bytes = [0u8; 2];
        SlotsMut::set(bytes.as_mut_slice(), 1, 0x1AB);
        assert_eq!(bytes, [0, 0xAB]);
        assert_eq!(Slots::width(bytes.as_slice()), 8);
    }

    #[test]
    fn test_i8_slots() {
        let mut samples = [-128i8, 127];
        assert_eq!(Slots::get(samples.as_slice(), 0), 0x80);
        SlotsMut::set(samples.as_mut_slice(), 1, 0xFF);
        assert_eq!(samples[1], -1);
    }
}
