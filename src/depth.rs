use crate::{Error, Result};
use std::fmt;

/// Number of low-order bits of every slot that carry payload.
///
/// A depth is always between 1 and 16. Operations additionally require it to
/// be no wider than the slots of the cover they run against, so 8-bit image
/// channels accept depths 1 through 8 while 16-bit audio samples accept the
/// full range.
///
/// # Examples
///
/// ```
/// use lsbs::BitDepth;
///
/// let depth = BitDepth::new(3)?;
/// assert_eq!(depth.get(), 3);
/// assert_eq!(depth.mask(), 0b111);
///
/// assert!(BitDepth::new(0).is_err());
/// # Ok::<(), lsbs::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitDepth(u8);

impl BitDepth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 16;

    /// Depths tried by blind decoding when the caller does not choose any.
    pub const BLIND_MAX: u8 = 8;

    pub const ONE: Self = Self(1);

    /// Creates a new depth, rejecting values outside `1..=16`.
    pub fn new(bits: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(Error::InvalidBitDepth {
                depth: bits,
                max: Self::MAX,
            })
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the mask selecting the low `self` bits of a slot.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u16 {
        ((1u32 << self.0) - 1) as u16
    }

    /// Returns every depth from 1 through 8, in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::BLIND_MAX).map(Self)
    }

    /// Checks that this depth fits in slots `width` bits wide.
    pub(crate) fn check_width(self, width: u8) -> Result<()> {
        if self.0 <= width {
            Ok(())
        } else {
            Err(Error::InvalidBitDepth {
                depth: self.0,
                max: width,
            })
        }
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<BitDepth> for u8 {
    fn from(depth: BitDepth) -> Self {
        depth.0
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
