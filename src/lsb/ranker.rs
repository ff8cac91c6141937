use super::{Framing, Package};
use crate::{BitDepth, Error, Result, Slots};
use std::cmp::Ordering;
use tracing::debug;

/// One blind-decoding attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub depth: BitDepth,
    /// Bytes recovered at this depth, complete or not.
    pub payload: Vec<u8>,
    /// Fraction of alphanumeric bytes in `payload`, see [`score`].
    pub score: f64,
    /// Whether a complete frame was found at this depth.
    pub complete: bool,
}

/// Scores a decoded payload by the fraction of its bytes that are alphanumeric.
///
/// Bytes are read as Latin-1 characters, so accented letters count as
/// alphanumeric. An empty payload scores `0.0`.
///
/// # Examples
///
/// ```
/// assert_eq!(lsbs::score(b"SECRET42"), 1.0);
/// assert_eq!(lsbs::score(b"ab, cd"), 4.0 / 6.0);
/// assert_eq!(lsbs::score(b""), 0.0);
/// ```
#[must_use]
pub fn score(payload: &[u8]) -> f64 {
    if payload.is_empty() {
        return 0.0;
    }

    let alphanumeric = payload
        .iter()
        .filter(|&&byte| char::from(byte).is_alphanumeric())
        .count();

    alphanumeric as f64 / payload.len() as f64
}

/// Guesses the depth of a hidden payload by decoding at every candidate depth.
///
/// Every attempt starts over with a fresh view from the accessor factory.
/// Candidates are returned best first; equal scores keep ascending depth
/// order. The ranking is a heuristic: a high score is a good guess, not
/// proof that the depth is right.
///
/// # Examples
///
/// ```
/// use lsbs::{BitDepth, Carrier, Conceal, Framing, Ranker};
///
/// let mut cover: Vec<u8> = (0..4096).map(|i| (i * 7919 % 251) as u8).collect();
/// Carrier::text(BitDepth::new(3)?).conceal(b"SECRET42", cover.as_mut_slice())?;
///
/// let ranking = Ranker::new(Framing::text()).rank(|| cover.as_slice())?;
///
/// assert_eq!(ranking[0].depth.get(), 3);
/// assert_eq!(ranking[0].payload, b"SECRET42");
/// # Ok::<(), lsbs::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Ranker<F = fn() -> bool>
where
    F: FnMut() -> bool,
{
    framing: Framing,
    depths: Vec<BitDepth>,
    cancelled: F,
}

fn never() -> bool {
    false
}

impl Ranker {
    /// Creates a ranker trying depths 1 through 8.
    #[must_use]
    pub fn new(framing: Framing) -> Self {
        Self {
            framing,
            depths: BitDepth::all().collect(),
            cancelled: never,
        }
    }
}

impl<F> Ranker<F>
where
    F: FnMut() -> bool,
{
    /// Replaces the candidate depths. Duplicates are ignored.
    #[must_use]
    pub fn with_depths<I>(mut self, depths: I) -> Self
    where
        I: IntoIterator<Item = BitDepth>,
    {
        self.depths = depths.into_iter().collect();
        self.depths.sort_unstable();
        self.depths.dedup();
        self
    }

    /// Replaces the cancellation check, which is polled before every attempt
    /// and while scanning.
    #[must_use]
    pub fn with_cancel<G>(self, cancelled: G) -> Ranker<G>
    where
        G: FnMut() -> bool,
    {
        Ranker {
            framing: self.framing,
            depths: self.depths,
            cancelled,
        }
    }

    /// Decodes at every candidate depth and ranks the results.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBitDepth`] if a candidate depth is wider than the
    /// cover's slots, or [`Error::Cancelled`].
    pub fn rank<S, M>(&mut self, mut open: M) -> Result<Vec<Candidate>>
    where
        S: Slots,
        M: FnMut() -> S,
    {
        let mut candidates = Vec::with_capacity(self.depths.len());

        for &depth in &self.depths {
            if (self.cancelled)() {
                return Err(Error::Cancelled);
            }

            let cover = open();
            let extraction = Package::new(depth, self.framing)
                .with_cancel(&mut self.cancelled)
                .extract(&cover)?;
            let score = score(&extraction.payload);

            debug!(
                depth = depth.get(),
                score,
                complete = extraction.complete,
                len = extraction.payload.len(),
                "depth attempted"
            );

            candidates.push(Candidate {
                depth,
                payload: extraction.payload,
                score,
                complete: extraction.complete,
            });
        }

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Ok(candidates)
    }
}

/// Ranks every depth from 1 to 8 on a single cover.
///
/// # Errors
///
/// See [`Ranker::rank`].
pub fn rank<S: Slots + ?Sized>(cover: &S, framing: Framing) -> Result<Vec<Candidate>> {
    Ranker::new(framing).rank(|| cover)
}
