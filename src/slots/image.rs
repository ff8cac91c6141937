use super::{Slots, SlotsMut};
use crate::{Error, Result};

/// Channel arrangement of an interleaved 8-bit pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelLayout {
    #[default]
    Rgb,
    Rgba,
    /// Blue-green-red order, as produced by OpenCV-style video decoders.
    Bgr,
    Bgra,
}

impl PixelLayout {
    /// Returns the number of bytes per pixel.
    #[must_use]
    pub const fn stride(self) -> usize {
        match self {
            Self::Rgb | Self::Bgr => 3,
            Self::Rgba | Self::Bgra => 4,
        }
    }

    /// Returns the byte offset of the red, green, or blue component (`0`, `1`, `2`)
    /// within one pixel.
    #[inline]
    pub(crate) const fn offset(self, component: usize) -> usize {
        match self {
            Self::Rgb | Self::Rgba => component,
            Self::Bgr | Self::Bgra => 2 - component,
        }
    }
}

/// Pixel channels of a single image as slots.
///
/// Pixels are visited row-major (top to bottom, left to right) and each
/// contributes its red, green, and blue channel in that order, regardless of
/// how the buffer stores them. Alpha is never addressed.
///
/// # Examples
///
/// ```
/// use lsbs::slots::{ImageSlots, PixelLayout, Slots};
///
/// let pixels = [10u8, 20, 30, 255, 40, 50, 60, 255];
/// let slots = ImageSlots::new(&pixels[..], 2, 1, PixelLayout::Rgba)?;
///
/// assert_eq!(slots.len(), 6);
/// assert_eq!(slots.get(3), 40);
/// # Ok::<(), lsbs::Error>(())
/// ```
#[derive(Debug)]
pub struct ImageSlots<B> {
    buf: B,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl<B: AsRef<[u8]>> ImageSlots<B> {
    /// Wraps `buf`, which must hold exactly `width * height` pixels in `layout`.
    pub fn new(buf: B, width: u32, height: u32, layout: PixelLayout) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * layout.stride();
        let actual = buf.as_ref().len();

        if expected != actual {
            return Err(Error::UnsupportedMedium(format!(
                "{width}x{height} {layout:?} image needs {expected} bytes, buffer has {actual}"
            )));
        }

        Ok(Self::from_parts(buf, width, height, layout))
    }

    /// Wraps a buffer whose geometry the caller already guarantees.
    pub(crate) const fn from_parts(buf: B, width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            buf,
            width,
            height,
            layout,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Consumes the view and returns the underlying buffer.
    pub fn into_inner(self) -> B {
        self.buf
    }

    #[inline]
    fn byte_index(&self, index: usize) -> usize {
        (index / 3) * self.layout.stride() + self.layout.offset(index % 3)
    }
}

impl<B: AsRef<[u8]>> Slots for ImageSlots<B> {
    fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 3
    }

    fn width(&self) -> u8 {
        8
    }

    fn get(&self, index: usize) -> u16 {
        assert!(index < self.len(), "slot index {index} out of bounds");
        u16::from(self.buf.as_ref()[self.byte_index(index)])
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> SlotsMut for ImageSlots<B> {
    fn set(&mut self, index: usize, value: u16) {
        assert!(index < self.len(), "slot index {index} out of bounds");
        let byte = self.byte_index(index);
        self.buf.as_mut()[byte] = value as u8;
    }
}
