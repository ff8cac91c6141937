//! # LSBS
//!
//! The **LSBS** (**L**east **S**ignificant **B**it **S**teganography) library
//! hides byte payloads in the low-order bits of image, audio, and video
//! samples, and recovers them again.
//!
//! ## Slots
//!
//! Every medium is seen through the [`Slots`] trait: a flat, ordered sequence
//! of 8- or 16-bit values. The [`slots`] module provides adapters for pixel
//! buffers, PCM samples, and decoded video frames. Decoding and encoding the
//! actual files is left to the caller, or to the optional [`media`] module.
//!
//! ## LSB Codec
//!
//! The [`lsb`] module conceals and reveals payloads at a chosen [`BitDepth`],
//! and can guess the depth of a hidden text payload. See its
//! [documentation][`lsb`] for the wire format.
//!
//! Payloads are hidden in the clear. Anyone who guesses the depth can read
//! them, and any lossy re-encoding of the cover destroys them.

pub mod cover;
pub mod lsb;
#[cfg(feature = "media")]
pub mod media;
pub mod payload;
pub mod slots;

mod depth;
mod error;

pub use cover::CoverKind;
pub use depth::BitDepth;
pub use error::{Error, Result};
pub use lsb::{rank, score, Candidate, Carrier, Extraction, Framing, Package, Ranker};
pub use slots::{Slots, SlotsMut};

/// A trait for objects able to conceal steganographic payloads, or carriers.
///
/// Carriers are defined by a single required method, [`conceal`][Conceal::conceal],
/// which hides the payload in the given cover slots.
///
/// # Examples
///
/// [`Carrier`] conceals payloads in the least significant bits of each slot.
pub trait Conceal {
    /// Conceals the payload in `cover` and returns how many slots were written.
    ///
    /// # Errors
    ///
    /// Implementations validate everything up front: if an error is returned,
    /// no slot has been written.
    fn conceal<S: SlotsMut + ?Sized>(self, payload: &[u8], cover: &mut S) -> Result<usize>;
}

/// A trait for objects able to reveal steganographic payloads, or packages.
///
/// Packages are defined by a single required method, [`reveal`][Reveal::reveal],
/// which returns the payload hidden in the given cover slots.
///
/// # Examples
///
/// [`Package`] reveals payloads hidden by a [`Carrier`].
pub trait Reveal {
    /// Returns the complete payload hidden in `cover`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cover ends before the payload does. It is up
    /// to implementations to establish how the end of a payload is recognized.
    fn reveal<S: Slots + ?Sized>(self, cover: &S) -> Result<Vec<u8>>;
}
