use super::{bits, Framing};
use crate::{BitDepth, Conceal, Error, Result, Slots, SlotsMut};
use tracing::debug;

/// Conceals a payload in the low bits of a cover's slots.
///
/// The payload is framed, split into groups of `depth` bits, and group `i`
/// replaces the low `depth` bits of slot `i`. Scanning stops as soon as the
/// framed payload is exhausted; every later slot is left untouched.
///
/// Concealing is all-or-nothing: the depth, the payload and the capacity
/// are all checked before the first slot is written, so a failed call leaves
/// the cover exactly as it was.
///
/// # Examples
///
/// ```
/// use lsbs::{BitDepth, Carrier, Conceal, Package, Reveal};
///
/// let mut cover = vec![0u8; 64];
/// let depth = BitDepth::new(2)?;
///
/// Carrier::text(depth).conceal(b"hidden", cover.as_mut_slice())?;
///
/// let payload = Package::text(depth).reveal(cover.as_slice())?;
/// assert_eq!(payload, b"hidden");
/// # Ok::<(), lsbs::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carrier {
    depth: BitDepth,
    framing: Framing,
}

impl Carrier {
    #[must_use]
    pub fn new(depth: BitDepth, framing: Framing) -> Self {
        Self { depth, framing }
    }

    /// Creates a carrier for NUL-free text, terminated by a NUL byte.
    #[must_use]
    pub fn text(depth: BitDepth) -> Self {
        Self::new(depth, Framing::text())
    }

    /// Creates a carrier for arbitrary bytes, prefixed by their length.
    #[must_use]
    pub fn binary(depth: BitDepth) -> Self {
        Self::new(depth, Framing::binary())
    }

    #[must_use]
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    #[must_use]
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Returns how many payload bits `cover` can hold at this depth, framing included.
    pub fn capacity_bits<S: Slots + ?Sized>(&self, cover: &S) -> usize {
        cover.len() * usize::from(self.depth.get())
    }

    /// Returns the largest payload, in bytes, that fits in `cover`.
    pub fn capacity<S: Slots + ?Sized>(&self, cover: &S) -> usize {
        (self.capacity_bits(cover) / 8).saturating_sub(self.framing.overhead())
    }
}

impl Conceal for &Carrier {
    fn conceal<S: SlotsMut + ?Sized>(self, payload: &[u8], cover: &mut S) -> Result<usize> {
        self.depth.check_width(cover.width())?;

        let framed = self.framing.frame(payload)?;
        let needed = framed.len() * 8;
        let capacity = self.capacity_bits(&*cover);

        if needed > capacity {
            return Err(Error::PayloadTooLarge { needed, capacity });
        }

        let mask = self.depth.mask();
        let groups = bits::Groups::new(&framed, self.depth);
        let touched = groups.len();

        for (index, group) in groups.enumerate() {
            let slot = cover.get(index);
            cover.set(index, (slot & !mask) | group);
        }

        debug!(
            depth = self.depth.get(),
            framed_bits = needed,
            touched,
            slots = cover.len(),
            "payload concealed"
        );

        Ok(touched)
    }
}
