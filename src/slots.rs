//! Flat, randomly addressable views over decoded cover media.
//!
//! Every medium is presented to the codec as one ordered sequence of *slots*:
//! fixed-width unsigned integers whose low bits carry the payload. The order
//! is part of the wire format, so encoding and decoding must see the same
//! adapter with the same configuration.
//!
//! | Medium | Adapter | Order | Width |
//! |--------|---------|-------|-------|
//! | Image  | [`ImageSlots`] | row-major pixels, then R, G, B | 8 |
//! | Audio  | `[u8]`, `[i8]`, `[u16]`, `[i16]` | interleaved sample order | 8 or 16 |
//! | Video  | [`VideoSlots`] | frames, then row-major pixels, one channel | 8 |
//!
//! Adapters borrow the buffer the decoder already produced; nothing is copied.

mod audio;
mod image;
mod video;

pub use image::{ImageSlots, PixelLayout};
pub use video::{Channel, FrameGeometry, VideoSlots};

/// A read-only sequence of slots.
pub trait Slots {
    /// Returns the total number of slots.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the width of each slot in bits, either 8 or 16.
    fn width(&self) -> u8;

    /// Returns the slot at `index` as an unsigned value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn get(&self, index: usize) -> u16;
}

/// A sequence of slots that can be overwritten in place.
pub trait SlotsMut: Slots {
    /// Stores `value` at `index`. Bits above the slot width are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn set(&mut self, index: usize, value: u16);
}

impl<S: Slots + ?Sized> Slots for &S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn width(&self) -> u8 {
        (**self).width()
    }

    fn get(&self, index: usize) -> u16 {
        (**self).get(index)
    }
}

impl<S: Slots + ?Sized> Slots for &mut S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn width(&self) -> u8 {
        (**self).width()
    }

    fn get(&self, index: usize) -> u16 {
        (**self).get(index)
    }
}

impl<S: SlotsMut + ?Sized> SlotsMut for &mut S {
    fn set(&mut self, index: usize, value: u16) {
        (**self).set(index, value);
    }
}
