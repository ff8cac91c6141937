//! Errors returned by the codec and the media adapters.

use thiserror::Error;

/// A specialized [`Result`][std::result::Result] type for `lsbs` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while concealing or revealing a payload.
#[derive(Error, Debug)]
pub enum Error {
    /// The framed payload needs more bits than the cover offers at the chosen depth.
    #[error("payload too large: needs {needed} bits, cover holds {capacity} bits")]
    PayloadTooLarge { needed: usize, capacity: usize },

    #[error("unsupported medium: {0}")]
    UnsupportedMedium(String),

    /// The cover was exhausted before a terminator was seen.
    ///
    /// `partial` holds every byte collected up to that point.
    #[error("no end-of-payload delimiter found after {} bytes", partial.len())]
    DelimiterNotFound { partial: Vec<u8> },

    /// The cover was exhausted before the declared length was reached.
    #[error("truncated payload: expected {expected} bytes, found {actual}")]
    TruncatedPayload { expected: usize, actual: usize },

    #[error("invalid bit depth {depth}: must be between 1 and {max}")]
    InvalidBitDepth { depth: u8, max: u8 },

    /// A text payload contains the NUL terminator used by sentinel framing.
    #[error("payload contains the NUL terminator at byte {offset}")]
    SentinelInPayload { offset: usize },

    #[error("payload of {len} bytes is not a whole number of {unit}-byte elements")]
    MisalignedPayload { len: usize, unit: usize },

    #[error("invalid payload record: {0}")]
    InvalidRecord(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "media")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[cfg(feature = "media")]
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PayloadTooLarge {
            needed: 248,
            capacity: 192,
        };
        assert!(err.to_string().contains("needs 248 bits"));

        let err = Error::DelimiterNotFound {
            partial: b"abc".to_vec(),
        };
        assert!(err.to_string().contains("after 3 bytes"));

        let err = Error::InvalidBitDepth { depth: 9, max: 8 };
        assert!(err.to_string().contains("between 1 and 8"));

        let err = Error::SentinelInPayload { offset: 4 };
        assert!(err.to_string().contains("byte 4"));
    }
}
