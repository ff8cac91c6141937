use crate::{Error, Result};
use std::ops::ControlFlow;

/// Terminator byte of sentinel framing.
pub const SENTINEL: u8 = 0x00;

/// Width in bytes of the element count that opens a length-prefixed frame.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Upper bound on memory reserved up front for a declared payload length.
const MAX_RESERVE: usize = 1 << 20;

/// How a payload is delimited inside the hidden bitstream.
///
/// The framed payload is what actually gets written into the slots, most
/// significant bit of each byte first:
///
/// - [`Framing::Sentinel`]: `payload || 0x00`. Meant for text; payloads
///   containing a NUL byte are rejected when framing.
/// - [`Framing::LengthPrefixed`]: a big-endian `u32` element count, then the
///   elements, each `unit` bytes wide. Safe for arbitrary binary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Framing {
    #[default]
    Sentinel,
    LengthPrefixed { unit: usize },
}

impl Framing {
    /// Sentinel framing for NUL-free text.
    #[must_use]
    pub const fn text() -> Self {
        Self::Sentinel
    }

    /// Length-prefixed framing counting bytes.
    #[must_use]
    pub const fn binary() -> Self {
        Self::LengthPrefixed { unit: 1 }
    }

    /// Length-prefixed framing counting 16-bit samples.
    #[must_use]
    pub const fn samples16() -> Self {
        Self::LengthPrefixed { unit: 2 }
    }

    /// Returns the number of framing bytes added around a payload.
    #[must_use]
    pub const fn overhead(&self) -> usize {
        match self {
            Self::Sentinel => 1,
            Self::LengthPrefixed { .. } => LENGTH_PREFIX_LEN,
        }
    }

    /// Returns the length in bits of a framed payload of `payload_len` bytes.
    #[must_use]
    pub const fn framed_bits(&self, payload_len: usize) -> usize {
        (payload_len + self.overhead()) * 8
    }

    /// Frames `payload` for embedding.
    ///
    /// # Errors
    ///
    /// - [`Error::SentinelInPayload`] if a sentinel-framed payload contains `0x00`.
    /// - [`Error::MisalignedPayload`] if a length-prefixed payload is not a whole
    ///   number of elements.
    /// - [`Error::PayloadTooLarge`] if the element count does not fit in 32 bits.
    pub fn frame(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let mut framed = Vec::with_capacity(payload.len() + self.overhead());

        match *self {
            Self::Sentinel => {
                if let Some(offset) = payload.iter().position(|&byte| byte == SENTINEL) {
                    return Err(Error::SentinelInPayload { offset });
                }

                framed.extend_from_slice(payload);
                framed.push(SENTINEL);
            }
            Self::LengthPrefixed { unit } => {
                let unit = unit.max(1);
                if payload.len() % unit != 0 {
                    return Err(Error::MisalignedPayload {
                        len: payload.len(),
                        unit,
                    });
                }

                let count = u32::try_from(payload.len() / unit).map_err(|_| {
                    Error::PayloadTooLarge {
                        needed: self.framed_bits(payload.len()),
                        capacity: (u32::MAX as usize)
                            .saturating_mul(unit)
                            .saturating_add(LENGTH_PREFIX_LEN)
                            .saturating_mul(8),
                    }
                })?;

                framed.extend_from_slice(&count.to_be_bytes());
                framed.extend_from_slice(payload);
            }
        }

        Ok(framed)
    }

    /// Creates an incremental decoder for this framing.
    #[must_use]
    pub fn deframer(&self) -> Deframer {
        Deframer::new(*self)
    }

    /// Recovers a payload from a byte-aligned bitstream.
    ///
    /// Returns the payload and the number of bits consumed, including framing.
    ///
    /// # Errors
    ///
    /// [`Error::DelimiterNotFound`] or [`Error::TruncatedPayload`] if `bytes`
    /// ends before the frame does.
    pub fn deframe(&self, bytes: &[u8]) -> Result<(Vec<u8>, usize)> {
        let mut deframer = self.deframer();

        for &byte in bytes {
            if deframer.push(byte).is_break() {
                break;
            }
        }

        let consumed = deframer.consumed_bits();
        Ok((deframer.finish()?, consumed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scan,
    Prefix { read: usize, count: u32 },
    Body { remaining: usize },
    Done,
}

/// Byte-at-a-time decoder for a [`Framing`].
///
/// Bytes are fed with [`push`][Deframer::push] until it returns
/// [`ControlFlow::Break`], which happens on the byte that completes the
/// frame. Nothing past that point needs to be read.
#[derive(Debug, Clone)]
pub struct Deframer {
    framing: Framing,
    state: State,
    payload: Vec<u8>,
    consumed: usize,
    expected: Option<usize>,
}

impl Deframer {
    fn new(framing: Framing) -> Self {
        let state = match framing {
            Framing::Sentinel => State::Scan,
            Framing::LengthPrefixed { .. } => State::Prefix { read: 0, count: 0 },
        };

        Self {
            framing,
            state,
            payload: Vec::new(),
            consumed: 0,
            expected: None,
        }
    }

    /// Feeds the next byte of the bitstream.
    pub fn push(&mut self, byte: u8) -> ControlFlow<()> {
        self.state = match self.state {
            State::Done => return ControlFlow::Break(()),
            State::Scan if byte == SENTINEL => State::Done,
            State::Scan => {
                self.payload.push(byte);
                State::Scan
            }
            State::Prefix { read, count } => {
                let count = (count << 8) | u32::from(byte);
                let read = read + 1;

                if read < LENGTH_PREFIX_LEN {
                    State::Prefix { read, count }
                } else {
                    let len = (count as usize).saturating_mul(self.unit());
                    self.expected = Some(len);
                    self.payload.reserve(len.min(MAX_RESERVE));

                    if len == 0 {
                        State::Done
                    } else {
                        State::Body { remaining: len }
                    }
                }
            }
            State::Body { remaining } => {
                self.payload.push(byte);

                if remaining == 1 {
                    State::Done
                } else {
                    State::Body {
                        remaining: remaining - 1,
                    }
                }
            }
        };

        self.consumed += 1;

        if self.state == State::Done {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn unit(&self) -> usize {
        match self.framing {
            Framing::Sentinel => 1,
            Framing::LengthPrefixed { unit } => unit.max(1),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == State::Done
    }

    /// Returns how many bits of the bitstream have been consumed so far.
    #[must_use]
    pub fn consumed_bits(&self) -> usize {
        self.consumed * 8
    }

    /// Returns the payload bytes collected so far.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the collected payload, complete or not.
    #[must_use]
    pub fn into_partial(self) -> Vec<u8> {
        self.payload
    }

    /// Returns the payload if the frame is complete.
    ///
    /// # Errors
    ///
    /// [`Error::DelimiterNotFound`] for an unterminated sentinel frame, or
    /// [`Error::TruncatedPayload`] for a length-prefixed frame that ended early.
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.is_complete() {
            return Ok(self.payload);
        }

        match self.framing {
            Framing::Sentinel => Err(Error::DelimiterNotFound {
                partial: self.payload,
            }),
            Framing::LengthPrefixed { .. } => Err(Error::TruncatedPayload {
                expected: self.expected.unwrap_or(0),
                actual: self.payload.len(),
            }),
        }
    }
}
