//! Decoding and encoding of cover files.
//!
//! This module is a thin layer over the [`image`] and [`hound`] crates. It
//! turns lossless image files and integer PCM WAV files into [`Slots`], and
//! writes them back after a payload has been concealed.
//!
//! Video containers are not decoded here. Decode the frames with a video
//! library and wrap them in [`VideoSlots`][crate::slots::VideoSlots].
//!
//! # Examples
//!
//! ```no_run
//! use lsbs::media::Cover;
//! use lsbs::{BitDepth, Carrier, Conceal};
//!
//! let mut cover = Cover::open("cover.png")?;
//! Carrier::text(BitDepth::ONE).conceal(b"meet at noon", &mut cover)?;
//! cover.save("stego.png")?;
//! # Ok::<(), lsbs::Error>(())
//! ```

mod image;
mod wav;

pub use self::image::Raster;
pub use self::wav::Wav;

use crate::{CoverKind, Error, Result, Slots, SlotsMut};
use std::path::Path;
use tracing::debug;

/// A decoded cover file of any supported kind.
#[derive(Debug, Clone)]
pub enum Cover {
    Image(Raster),
    Audio(Wav),
}

impl Cover {
    /// Opens and decodes the cover at `path`, choosing the decoder from its extension.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedMedium`] for video files, lossy images, compressed
    /// audio and unknown extensions, or the decoder's error if the file is
    /// malformed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let kind = CoverKind::from_path(path)?;

        let cover = match kind {
            CoverKind::Image if Raster::accepts(path) => Self::Image(Raster::open(path)?),
            CoverKind::Image => {
                return Err(Error::UnsupportedMedium(format!(
                    "{}: only PNG and BMP images can carry a payload",
                    path.display()
                )))
            }
            CoverKind::Audio if Wav::accepts(path) => Self::Audio(Wav::open(path)?),
            CoverKind::Audio => {
                return Err(Error::UnsupportedMedium(format!(
                    "{}: only WAV audio can carry a payload",
                    path.display()
                )))
            }
            CoverKind::Video => {
                return Err(Error::UnsupportedMedium(format!(
                    "{}: video must be decoded to frames first",
                    path.display()
                )))
            }
        };

        debug!(path = %path.display(), %kind, slots = cover.len(), "cover opened");

        Ok(cover)
    }

    #[must_use]
    pub fn kind(&self) -> CoverKind {
        match self {
            Self::Image(_) => CoverKind::Image,
            Self::Audio(_) => CoverKind::Audio,
        }
    }

    /// Encodes the cover to `path`. Images are encoded in the format named by
    /// the extension, which must be lossless.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match self {
            Self::Image(raster) => raster.save(path),
            Self::Audio(wav) => wav.save(path),
        }
    }
}

impl Slots for Cover {
    fn len(&self) -> usize {
        match self {
            Self::Image(raster) => raster.len(),
            Self::Audio(wav) => wav.len(),
        }
    }

    fn width(&self) -> u8 {
        match self {
            Self::Image(raster) => raster.width(),
            Self::Audio(wav) => wav.width(),
        }
    }

    fn get(&self, index: usize) -> u16 {
        match self {
            Self::Image(raster) => raster.get(index),
            Self::Audio(wav) => wav.get(index),
        }
    }
}

impl SlotsMut for Cover {
    fn set(&mut self, index: usize, value: u16) {
        match self {
            Self::Image(raster) => raster.set(index, value),
            Self::Audio(wav) => wav.set(index, value),
        }
    }
}

impl From<Raster> for Cover {
    fn from(raster: Raster) -> Self {
        Self::Image(raster)
    }
}

impl From<Wav> for Cover {
    fn from(wav: Wav) -> Self {
        Self::Audio(wav)
    }
}
