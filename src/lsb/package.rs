use super::{bits, Framing};
use crate::{BitDepth, Error, Result, Reveal, Slots};
use std::ops::ControlFlow;
use tracing::{debug, trace};

/// How many slots are read between two polls of the cancellation check.
pub const CANCEL_POLL_INTERVAL: usize = 4096;

/// The outcome of scanning a cover for a hidden payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Payload bytes recovered, up to the end of the frame or of the cover.
    pub payload: Vec<u8>,
    /// Whether the frame's terminator or declared length was reached.
    pub complete: bool,
    /// Number of slots read before scanning stopped.
    pub slots_read: usize,
}

fn never() -> bool {
    false
}

/// Reveals a payload concealed by a [`Carrier`][crate::Carrier].
///
/// It reads slots in order until one of the following occurs:
///
/// 1. The frame completes, i.e. the NUL terminator or the declared number of
///    bytes has been read, in which case no further slots are touched, or
/// 2. The cover is exhausted; bits that do not add up to a whole byte are
///    dropped, or
/// 3. The cancellation check reports `true`.
///
/// Revealing never modifies the cover, so it can be repeated on the same
/// slots with identical results.
///
/// # Examples
///
/// Recovering what is there even when the frame is incomplete:
///
/// ```
/// use lsbs::{BitDepth, Package};
///
/// let cover = [0u8, 1, 0, 0, 0, 0, 0, 1];
/// let extraction = Package::text(BitDepth::ONE).extract(cover.as_slice())?;
///
/// assert_eq!(extraction.payload, b"A");
/// assert!(!extraction.complete);
/// # Ok::<(), lsbs::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Package<F = fn() -> bool>
where
    F: FnMut() -> bool,
{
    depth: BitDepth,
    framing: Framing,
    cancelled: F,
}

impl Package {
    #[must_use]
    pub fn new(depth: BitDepth, framing: Framing) -> Self {
        Self {
            depth,
            framing,
            cancelled: never,
        }
    }

    /// Creates a package for NUL-terminated text.
    #[must_use]
    pub fn text(depth: BitDepth) -> Self {
        Self::new(depth, Framing::text())
    }

    /// Creates a package for length-prefixed bytes.
    #[must_use]
    pub fn binary(depth: BitDepth) -> Self {
        Self::new(depth, Framing::binary())
    }
}

impl<F> Package<F>
where
    F: FnMut() -> bool,
{
    /// Replaces the cancellation check.
    ///
    /// `cancelled` is polled every [`CANCEL_POLL_INTERVAL`] slots; once it
    /// returns `true` extraction stops with [`Error::Cancelled`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lsbs::{BitDepth, Error, Package};
    ///
    /// let cover = vec![0xFFu8; 10_000];
    /// let mut package = Package::text(BitDepth::ONE).with_cancel(|| true);
    ///
    /// assert!(matches!(package.extract(cover.as_slice()), Err(Error::Cancelled)));
    /// ```
    #[must_use]
    pub fn with_cancel<G>(self, cancelled: G) -> Package<G>
    where
        G: FnMut() -> bool,
    {
        Package {
            depth: self.depth,
            framing: self.framing,
            cancelled,
        }
    }

    #[must_use]
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    #[must_use]
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Scans `cover` and returns whatever was recovered, complete or not.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBitDepth`] if the depth is wider than the cover's
    /// slots, or [`Error::Cancelled`].
    pub fn extract<S: Slots + ?Sized>(&mut self, cover: &S) -> Result<Extraction> {
        let (deframer, slots_read) = self.scan(cover)?;

        Ok(Extraction {
            complete: deframer.is_complete(),
            payload: deframer.into_partial(),
            slots_read,
        })
    }

    fn scan<S: Slots + ?Sized>(&mut self, cover: &S) -> Result<(super::Deframer, usize)> {
        self.depth.check_width(cover.width())?;

        let mask = self.depth.mask();
        let mut deframer = self.framing.deframer();
        let mut bytes = bits::Bytes::default();
        let mut slots_read = 0;

        for index in 0..cover.len() {
            if index % CANCEL_POLL_INTERVAL == 0 && (self.cancelled)() {
                debug!(index, "extraction cancelled");
                return Err(Error::Cancelled);
            }

            slots_read = index + 1;
            let group = cover.get(index) & mask;

            if let ControlFlow::Break(()) =
                bytes.push(group, self.depth, |byte| deframer.push(byte))
            {
                break;
            }
        }

        trace!(
            depth = self.depth.get(),
            slots_read,
            slots = cover.len(),
            complete = deframer.is_complete(),
            "cover scanned"
        );

        Ok((deframer, slots_read))
    }
}

impl<F> Reveal for &mut Package<F>
where
    F: FnMut() -> bool,
{
    fn reveal<S: Slots + ?Sized>(self, cover: &S) -> Result<Vec<u8>> {
        let (deframer, _) = self.scan(cover)?;
        deframer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Carrier, Conceal};

    fn depth(bits: u8) -> BitDepth {
        BitDepth::new(bits).unwrap()
    }

    #[test]
    fn test_stops_at_terminator() {
        let mut cover = vec![0u8; 1000];
        Carrier::text(depth(2))
            .conceal(b"Hi", cover.as_mut_slice())
            .unwrap();

        let extraction = Package::text(depth(2)).extract(cover.as_slice()).unwrap();

        assert_eq!(extraction.payload, b"Hi");
        assert!(extraction.complete);
        // 24 framed bits at 2 bits per slot
        assert_eq!(extraction.slots_read, 12);
    }

    #[test]
    fn test_stops_at_declared_length() {
        let mut cover = vec![0xFFu8; 1000];
        Carrier::binary(depth(8))
            .conceal(&[0, 0, 7], cover.as_mut_slice())
            .unwrap();

        let extraction = Package::binary(depth(8)).extract(cover.as_slice()).unwrap();

        assert_eq!(extraction.payload, [0, 0, 7]);
        assert!(extraction.complete);
        assert_eq!(extraction.slots_read, 7);
    }

    #[test]
    fn test_missing_terminator() {
        let cover = [0xFFu8; 20];
        let result = Package::text(depth(1)).reveal(cover.as_slice());

        match result {
            Err(Error::DelimiterNotFound { partial }) => assert_eq!(partial, [0xFF, 0xFF]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_truncated_length() {
        let mut cover = vec![0u8; 48];
        // claims 1000 bytes but the cover ends after two
        let framed = [0u8, 0, 0x03, 0xE8, 1, 2];
        cover.copy_from_slice(
            &framed
                .iter()
                .flat_map(|byte| (0..8u32).rev().map(move |bit| (byte >> bit) & 1))
                .collect::<Vec<u8>>(),
        );

        let result = Package::binary(depth(1)).reveal(cover.as_slice());
        assert!(matches!(
            result,
            Err(Error::TruncatedPayload {
                expected: 1000,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_repeated_reveal_is_stable() {
        let mut cover: Vec<u8> = (0..=255).collect();
        Carrier::text(depth(5))
            .conceal(b"same every time", cover.as_mut_slice())
            .unwrap();
        let snapshot = cover.clone();

        let mut package = Package::text(depth(5));
        let first = package.reveal(cover.as_slice()).unwrap();
        let second = package.reveal(cover.as_slice()).unwrap();

        assert_eq!(first, second);
        assert_eq!(cover, snapshot);
    }

    #[test]
    fn test_cancel_is_polled() {
        let cover = vec![0xFFu8; CANCEL_POLL_INTERVAL * 3];
        let mut polls = 0;

        let result = Package::text(depth(1))
            .with_cancel(|| {
                polls += 1;
                polls == 2
            })
            .extract(cover.as_slice());

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(polls, 2);
    }
}
