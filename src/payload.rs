//! Payload preparation and structured payload records.
//!
//! Text payloads ride [`Framing::Sentinel`][crate::Framing::Sentinel] and
//! must not contain NUL, which [`sanitize_text`] guarantees. Structured
//! payloads wrap other media:
//!
//! - [`ImageRecord`] is a textual record, `PNG-<width>,<height>-<b0>,<b1>,...`,
//!   where the bytes are an encoded image file. Being NUL-free text, it can
//!   be hidden with sentinel framing.
//! - [`AudioRecord`] is a sequence of 16-bit samples, hidden big-endian under
//!   [`Framing::samples16`][crate::Framing::samples16].

use crate::{Error, Result};
use std::fmt::Write;

const IMAGE_TAG: &str = "PNG";

/// Sample rate assumed for audio recovered from an [`AudioRecord`].
pub const RECOVERED_SAMPLE_RATE: u32 = 44_100;

/// Strips everything that cannot travel in a sentinel-framed text payload.
///
/// Non-ASCII characters and NUL bytes are dropped; everything else is kept
/// in order.
///
/// # Examples
///
/// ```
/// assert_eq!(lsbs::payload::sanitize_text("héllo\0 wörld"), b"hllo wrld");
/// ```
#[must_use]
pub fn sanitize_text(text: &str) -> Vec<u8> {
    text.bytes()
        .filter(|&byte| byte.is_ascii() && byte != 0)
        .collect()
}

/// An encoded image carried as a textual payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub width: u32,
    pub height: u32,
    /// The encoded image file, e.g. PNG bytes.
    pub bytes: Vec<u8>,
}

impl ImageRecord {
    #[must_use]
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes,
        }
    }

    /// Renders the record in its textual form.
    ///
    /// # Examples
    ///
    /// ```
    /// use lsbs::payload::ImageRecord;
    ///
    /// let record = ImageRecord::new(2, 1, vec![137, 80, 78]);
    /// assert_eq!(record.to_record(), "PNG-2,1-137,80,78");
    /// ```
    #[must_use]
    pub fn to_record(&self) -> String {
        let mut out = String::with_capacity(16 + self.bytes.len() * 4);
        let _ = write!(out, "{IMAGE_TAG}-{},{}-", self.width, self.height);

        for (index, byte) in self.bytes.iter().enumerate() {
            if index > 0 {
                out.push(',');
            }
            let _ = write!(out, "{byte}");
        }

        out
    }

    /// Parses a record produced by [`to_record`][ImageRecord::to_record].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRecord`] if `record` is not a well-formed image record.
    pub fn parse(record: &str) -> Result<Self> {
        let mut parts = record.split('-');

        let (Some(tag), Some(dimensions), Some(data), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected three '-' separated parts"));
        };

        if tag != IMAGE_TAG {
            return Err(invalid(format!("unknown tag {tag:?}")));
        }

        let (width, height) = dimensions
            .split_once(',')
            .ok_or_else(|| invalid("expected <width>,<height>"))?;
        let width = width
            .parse()
            .map_err(|_| invalid(format!("bad width {width:?}")))?;
        let height = height
            .parse()
            .map_err(|_| invalid(format!("bad height {height:?}")))?;

        let bytes = if data.is_empty() {
            Vec::new()
        } else {
            data.split(',')
                .map(|byte| {
                    byte.parse::<u8>()
                        .map_err(|_| invalid(format!("bad byte {byte:?}")))
                })
                .collect::<Result<_>>()?
        };

        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    /// Checks whether `record` looks like an image record, without parsing the data.
    #[must_use]
    pub fn is_record(record: &str) -> bool {
        let parts: Vec<&str> = record.splitn(4, '-').collect();
        parts.len() == 3
            && parts[0] == IMAGE_TAG
            && parts[1].split(',').count() == 2
    }
}

/// A run of 16-bit audio samples carried as a binary payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioRecord {
    pub samples: Vec<i16>,
}

impl AudioRecord {
    #[must_use]
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// Returns the samples as big-endian bytes, two per sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use lsbs::payload::AudioRecord;
    ///
    /// let record = AudioRecord::new(vec![1, -2]);
    /// assert_eq!(record.to_bytes(), [0x00, 0x01, 0xFF, 0xFE]);
    /// ```
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.samples
            .iter()
            .flat_map(|sample| sample.to_be_bytes())
            .collect()
    }

    /// Rebuilds a record from big-endian sample bytes.
    ///
    /// # Errors
    ///
    /// [`Error::MisalignedPayload`] if `bytes` has an odd length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 2 != 0 {
            return Err(Error::MisalignedPayload {
                len: bytes.len(),
                unit: 2,
            });
        }

        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self { samples })
    }
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::InvalidRecord(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("plain"), b"plain");
        assert_eq!(sanitize_text("tab\tnew\nline"), b"tab\tnew\nline");
        assert_eq!(sanitize_text("\u{0}ñ€"), b"");
    }

    #[test]
    fn test_image_record_roundtrip() {
        let record = ImageRecord::new(640, 480, vec![0, 255, 10]);
        let text = record.to_record();

        assert_eq!(text, "PNG-640,480-0,255,10");
        assert!(ImageRecord::is_record(&text));
        assert_eq!(ImageRecord::parse(&text).unwrap(), record);
    }

    #[test]
    fn test_image_record_is_sentinel_safe() {
        let record = ImageRecord::new(1, 1, vec![0, 0, 0]);
        assert!(!record.to_record().bytes().any(|b| b == 0));
    }

    #[test]
    fn test_image_record_empty_data() {
        let record = ImageRecord::new(0, 0, Vec::new());
        assert_eq!(ImageRecord::parse(&record.to_record()).unwrap(), record);
    }

    #[test]
    fn test_image_record_rejects_malformed() {
        for text in [
            "JPG-1,1-0",
            "PNG-1-0",
            "PNG-1,1",
            "PNG-1,1-0-0",
            "PNG-a,1-0",
            "PNG-1,1-256",
        ] {
            assert!(
                matches!(ImageRecord::parse(text), Err(Error::InvalidRecord(_))),
                "{text} should be rejected"
            );
        }

        assert!(!ImageRecord::is_record("hello world"));
        assert!(!ImageRecord::is_record("PNG-1-0"));
    }

    #[test]
    fn test_audio_record_bytes() {
        let record = AudioRecord::new(vec![0, i16::MAX, i16::MIN, -1]);
        let bytes = record.to_bytes();

        assert_eq!(bytes.len(), 8);
        assert_eq!(AudioRecord::from_bytes(&bytes).unwrap(), record);
        assert!(matches!(
            AudioRecord::from_bytes(&[1, 2, 3]),
            Err(Error::MisalignedPayload { len: 3, unit: 2 })
        ));
    }
}
