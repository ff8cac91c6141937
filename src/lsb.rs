//! The least-significant-bit codec.
//!
//! The [`Carrier`] and [`Package`] structures conceal and reveal payloads in the
//! low bits of any [`Slots`][crate::Slots] sequence, and [`Ranker`] guesses the
//! depth of a payload when it is not known.
//!
//! ## Wire Format
//!
//! A payload is first *framed*, see [`Framing`]:
//!
//! | Framing | Layout | Use |
//! |---------|--------|-----|
//! | [`Framing::Sentinel`] | `payload`, `0x00` | NUL-free text |
//! | [`Framing::LengthPrefixed`] | big-endian `u32` element count, `payload` | binary data, 16-bit samples |
//!
//! The framed bytes are read most significant bit first and cut into groups
//! of `depth` bits; the last group is padded with zeros on the right. Group
//! `i` replaces the low `depth` bits of slot `i`, so slot `i` always carries
//! bits `i * depth .. (i + 1) * depth` of the stream. Disjoint slot ranges can
//! therefore be processed independently.
//!
//! Both sides must agree on three things: the slot order (the medium adapter
//! and its configuration), the depth, and the framing. The depth can be
//! recovered with [`Ranker`] when the payload is text.
//!
//! ## Examples
//!
//! Hiding text in an image and reading it back:
//!
//! ```
//! use lsbs::slots::{ImageSlots, PixelLayout};
//! use lsbs::{BitDepth, Carrier, Conceal, Package, Reveal};
//!
//! // an 8x8 black RGB image offers 192 slots
//! let mut pixels = vec![0u8; 8 * 8 * 3];
//! let depth = BitDepth::ONE;
//!
//! let mut cover = ImageSlots::new(pixels.as_mut_slice(), 8, 8, PixelLayout::Rgb)?;
//! Carrier::text(depth).conceal(b"Hi", &mut cover)?;
//!
//! let cover = ImageSlots::new(pixels.as_slice(), 8, 8, PixelLayout::Rgb)?;
//! assert_eq!(Package::text(depth).reveal(&cover)?, b"Hi");
//! # Ok::<(), lsbs::Error>(())
//! ```
//!
//! Hiding arbitrary bytes, NUL included, in 16-bit audio:
//!
//! ```
//! use lsbs::{BitDepth, Carrier, Conceal, Package, Reveal};
//!
//! let mut samples = vec![0i16; 1024];
//! let depth = BitDepth::new(4)?;
//!
//! Carrier::binary(depth).conceal(&[0, 159, 146, 150], samples.as_mut_slice())?;
//!
//! let payload = Package::binary(depth).reveal(samples.as_slice())?;
//! assert_eq!(payload, [0, 159, 146, 150]);
//! # Ok::<(), lsbs::Error>(())
//! ```

mod bits;
mod carrier;
mod frame;
mod package;
mod ranker;

pub use carrier::Carrier;
pub use frame::{Deframer, Framing, LENGTH_PREFIX_LEN, SENTINEL};
pub use package::{Extraction, Package, CANCEL_POLL_INTERVAL};
pub use ranker::{rank, score, Candidate, Ranker};
