//! Classification of cover files.
//!
//! The kind of a cover is resolved once, from its MIME type or file
//! extension, and decides which slot adapter is used. Past that point the
//! codec is medium-agnostic.

use crate::{Error, Result};
use std::{fmt, path::Path, str::FromStr};

/// The broad category of a cover medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverKind {
    Image,
    Audio,
    Video,
}

impl CoverKind {
    /// Resolves a MIME type such as `image/png` or `audio/x-wav`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lsbs::CoverKind;
    ///
    /// assert_eq!(CoverKind::from_mime("image/png")?, CoverKind::Image);
    /// assert_eq!(CoverKind::from_mime("video/x-matroska")?, CoverKind::Video);
    /// assert!(CoverKind::from_mime("application/pdf").is_err());
    /// # Ok::<(), lsbs::Error>(())
    /// ```
    pub fn from_mime(mime: &str) -> Result<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/png" | "image/bmp" | "image/x-ms-bmp" | "image/jpeg" | "image/jpg"
            | "image/webp" => Ok(Self::Image),
            "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" | "audio/flac"
            | "audio/x-flac" | "audio/mpeg" => Ok(Self::Audio),
            "video/x-matroska" | "video/avi" | "video/x-msvideo" | "video/mp4"
            | "video/quicktime" => Ok(Self::Video),
            _ => Err(Error::UnsupportedMedium(format!("MIME type {mime:?}"))),
        }
    }

    /// Resolves a file extension, with or without the leading dot.
    pub fn from_extension(extension: &str) -> Result<Self> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();

        match extension.as_str() {
            "png" | "bmp" | "jpg" | "jpeg" | "webp" => Ok(Self::Image),
            "wav" | "wave" | "flac" | "mp3" => Ok(Self::Audio),
            "mkv" | "avi" | "mp4" | "mov" => Ok(Self::Video),
            _ => Err(Error::UnsupportedMedium(format!("extension {extension:?}"))),
        }
    }

    /// Resolves the extension of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        path.extension()
            .and_then(|extension| extension.to_str())
            .ok_or_else(|| {
                Error::UnsupportedMedium(format!("{} has no extension", path.display()))
            })
            .and_then(Self::from_extension)
    }
}

impl FromStr for CoverKind {
    type Err = Error;

    /// Parses either a MIME type or a bare extension.
    fn from_str(s: &str) -> Result<Self> {
        if s.contains('/') {
            Self::from_mime(s)
        } else {
            Self::from_extension(s)
        }
    }
}

impl fmt::Display for CoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
        })
    }
}
