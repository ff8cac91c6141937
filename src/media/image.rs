use crate::slots::{ImageSlots, PixelLayout};
use crate::{Error, Result, Slots, SlotsMut};
use ::image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// An 8-bit RGB or RGBA image.
///
/// Only the color channels are addressed as slots. Grayscale, 16-bit and
/// floating point covers are rejected rather than converted, since a
/// conversion would change the slot sequence of the file. Images hidden as
/// payloads go through [`Raster::open_converted`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raster {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Raster {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_dynamic(::image::open(path)?)
    }

    /// Opens any decodable image, converting it to 8-bit RGBA unless it is
    /// already 8-bit RGB or RGBA.
    ///
    /// Meant for images hidden as payloads, whose slot order does not matter.
    pub fn open_converted<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_dynamic_converted(::image::open(path)?))
    }

    /// Decodes an in-memory image file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_dynamic(::image::load_from_memory(bytes)?)
    }

    /// # Errors
    ///
    /// [`Error::UnsupportedMedium`] unless `image` holds 8-bit RGB or RGBA pixels.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        match image {
            DynamicImage::ImageRgb8(image) => Ok(Self::Rgb(image)),
            DynamicImage::ImageRgba8(image) => Ok(Self::Rgba(image)),
            other => Err(Error::UnsupportedMedium(format!(
                "{:?} images are not supported, convert to 8-bit RGB",
                other.color()
            ))),
        }
    }

    #[must_use]
    pub fn from_dynamic_converted(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageRgb8(image) => Self::Rgb(image),
            DynamicImage::ImageRgba8(image) => Self::Rgba(image),
            other => Self::Rgba(other.to_rgba8()),
        }
    }

    /// Whether the extension of `path` names a lossless format this crate
    /// can decode and encode again.
    pub(crate) fn accepts(path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| {
                extension.eq_ignore_ascii_case("png") || extension.eq_ignore_ascii_case("bmp")
            })
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Rgb(image) => image.dimensions(),
            Self::Rgba(image) => image.dimensions(),
        }
    }

    #[must_use]
    pub fn layout(&self) -> PixelLayout {
        match self {
            Self::Rgb(_) => PixelLayout::Rgb,
            Self::Rgba(_) => PixelLayout::Rgba,
        }
    }

    /// Returns a view of the pixel channels.
    #[must_use]
    pub fn slots(&self) -> ImageSlots<&[u8]> {
        let (width, height) = self.dimensions();
        let layout = self.layout();
        let buf = match self {
            Self::Rgb(image) => &**image,
            Self::Rgba(image) => &**image,
        };

        ImageSlots::from_parts(buf, width, height, layout)
    }

    /// Returns a writable view of the pixel channels.
    pub fn slots_mut(&mut self) -> ImageSlots<&mut [u8]> {
        let (width, height) = self.dimensions();
        let layout = self.layout();
        let buf = match self {
            Self::Rgb(image) => &mut **image,
            Self::Rgba(image) => &mut **image,
        };

        ImageSlots::from_parts(buf, width, height, layout)
    }

    /// Encodes the image in the format named by the extension of `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match self {
            Self::Rgb(image) => image.save(path)?,
            Self::Rgba(image) => image.save(path)?,
        }
        Ok(())
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut cursor = Cursor::new(&mut bytes);

        match self {
            Self::Rgb(image) => image.write_to(&mut cursor, ImageFormat::Png)?,
            Self::Rgba(image) => image.write_to(&mut cursor, ImageFormat::Png)?,
        }

        Ok(bytes)
    }
}

impl Slots for Raster {
    fn len(&self) -> usize {
        let (width, height) = self.dimensions();
        (width as usize) * (height as usize) * 3
    }

    fn width(&self) -> u8 {
        8
    }

    fn get(&self, index: usize) -> u16 {
        self.slots().get(index)
    }
}

impl SlotsMut for Raster {
    fn set(&mut self, index: usize, value: u16) {
        self.slots_mut().set(index, value);
    }
}
