use super::{PixelLayout, Slots, SlotsMut};
use crate::{Error, Result};

/// The colour channel that carries payload in every video pixel.
///
/// Only one channel per pixel is used. Encoder and decoder must agree on it,
/// so it is part of the key shared with the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    Red,
    Green,
    #[default]
    Blue,
}

impl Channel {
    const fn component(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// Dimensions of a decoded frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
    pub frames: usize,
}

impl FrameGeometry {
    #[must_use]
    pub const fn pixels_per_frame(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// One channel of every pixel of every frame, as slots.
///
/// `buf` holds the decoded frames back to back, frame 0 first, each frame
/// row-major in `layout`. Slot `i` is pixel `i % pixels_per_frame` of frame
/// `i / pixels_per_frame`.
///
/// # Examples
///
/// ```
/// use lsbs::slots::{Channel, FrameGeometry, PixelLayout, Slots, VideoSlots};
///
/// let geometry = FrameGeometry { width: 2, height: 1, frames: 2 };
/// let frames = [
///     1u8, 2, 3, 4, 5, 6, // frame 0, BGR
///     7, 8, 9, 10, 11, 12, // frame 1, BGR
/// ];
///
/// let slots = VideoSlots::new(&frames[..], geometry, PixelLayout::Bgr, Channel::Blue)?;
/// let blue: Vec<u16> = (0..slots.len()).map(|i| slots.get(i)).collect();
///
/// assert_eq!(blue, [1, 4, 7, 10]);
/// # Ok::<(), lsbs::Error>(())
/// ```
#[derive(Debug)]
pub struct VideoSlots<B> {
    buf: B,
    geometry: FrameGeometry,
    layout: PixelLayout,
    channel: Channel,
}

impl<B: AsRef<[u8]>> VideoSlots<B> {
    /// Wraps `buf`, which must hold exactly `geometry.frames` frames in `layout`.
    pub fn new(
        buf: B,
        geometry: FrameGeometry,
        layout: PixelLayout,
        channel: Channel,
    ) -> Result<Self> {
        let expected = geometry.pixels_per_frame() * geometry.frames * layout.stride();
        let actual = buf.as_ref().len();

        if expected != actual {
            return Err(Error::UnsupportedMedium(format!(
                "{} frames of {}x{} {layout:?} need {expected} bytes, buffer has {actual}",
                geometry.frames, geometry.width, geometry.height
            )));
        }

        Ok(Self {
            buf,
            geometry,
            layout,
            channel,
        })
    }

    #[must_use]
    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    #[inline]
    fn byte_index(&self, index: usize) -> usize {
        index * self.layout.stride() + self.layout.offset(self.channel.component())
    }
}

impl<B: AsRef<[u8]>> Slots for VideoSlots<B> {
    fn len(&self) -> usize {
        self.geometry.pixels_per_frame() * self.geometry.frames
    }

    fn width(&self) -> u8 {
        8
    }

    fn get(&self, index: usize) -> u16 {
        assert!(index < self.len(), "slot index {index} out of bounds");
        u16::from(self.buf.as_ref()[self.byte_index(index)])
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> SlotsMut for VideoSlots<B> {
    fn set(&mut self, index: usize, value: u16) {
        assert!(index < self.len(), "slot index {index} out of bounds");
        let byte = self.byte_index(index);
        self.buf.as_mut()[byte] = value as u8;
    }
}
