use crate::BitDepth;
use std::ops::ControlFlow;

/// Splits a byte buffer into `depth`-bit groups, most significant bit first.
///
/// The last group is padded on the right with zeros when the buffer length
/// in bits is not a multiple of the depth. Group `i` starts at bit
/// `i * depth`, so any slot's share of the stream can be located directly.
pub(super) struct Groups<'a> {
    bytes: &'a [u8],
    cursor: usize,
    depth: u8,
}

impl<'a> Groups<'a> {
    pub(super) fn new(bytes: &'a [u8], depth: BitDepth) -> Self {
        Self {
            bytes,
            cursor: 0,
            depth: depth.get(),
        }
    }

    #[inline]
    fn bit(&self, pos: usize) -> u16 {
        match self.bytes.get(pos >> 3) {
            Some(byte) => u16::from((byte >> (7 - (pos & 7))) & 1),
            None => 0,
        }
    }
}

impl Iterator for Groups<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.bytes.len() * 8 {
            return None;
        }

        let mut group = 0u16;
        for offset in 0..usize::from(self.depth) {
            group = (group << 1) | self.bit(self.cursor + offset);
        }

        self.cursor += usize::from(self.depth);
        Some(group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = groups_needed(
            (self.bytes.len() * 8).saturating_sub(self.cursor),
            self.depth,
        );
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Groups<'_> {}

/// Reassembles `depth`-bit groups into bytes, most significant bit first.
#[derive(Debug, Default)]
pub(super) struct Bytes {
    acc: u32,
    filled: u8,
}

impl Bytes {
    /// Appends the low `depth` bits of `group`, handing every completed byte to
    /// `sink`. Stops as soon as `sink` breaks; any bits left over are dropped.
    #[inline]
    pub(super) fn push<F>(&mut self, group: u16, depth: BitDepth, mut sink: F) -> ControlFlow<()>
    where
        F: FnMut(u8) -> ControlFlow<()>,
    {
        self.acc = (self.acc << depth.get()) | u32::from(group & depth.mask());
        self.filled += depth.get();

        while self.filled >= 8 {
            self.filled -= 8;
            let byte = (self.acc >> self.filled) as u8;
            self.acc &= (1 << self.filled) - 1;

            sink(byte)?;
        }

        ControlFlow::Continue(())
    }
}

/// Returns how many `depth`-bit groups are needed to carry `bits` bits.
#[inline]
pub(super) fn groups_needed(bits: usize, depth: u8) -> usize {
    bits.div_ceil(usize::from(depth))
}
