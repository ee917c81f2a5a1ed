//! Tagged event records stored in the input FIFO.
//!
//! # Overview
//! - An [`Event`] is a small `Copy` record: one [`Payload`] variant plus a [`Color`] tag.
//! - Text is stored **by reference** (`&'a [u8]`), never copied. The queue lifetime `'a`
//!   guarantees the bytes are still alive when the event is drained.
//! - Integers are stored widened into a `u32` slot together with the operand [`Width`],
//!   which selects the hex digit count and the bits that carry the sign.
//! - Characters and framing symbols are stored inline in [`InlineChars`] (1..=4 bytes).

use crate::color::Color;

/// Operand byte width of a logged integer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Width {
    One = 1,
    Two = 2,
    Four = 4,
}

impl Width {
    /// Number of bytes in the operand.
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Fixed hexadecimal digit count for this width (2, 4 or 8).
    #[inline]
    pub const fn hex_digits(self) -> usize {
        self.bytes() * 2
    }
}

/// How a [`Number`] is rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Unsigned,
    Signed,
    Hex,
}

/// An integer operand widened into a 32-bit slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Number {
    pub value: u32,
    pub width: Width,
    pub format: Format,
}

/// Up to four raw bytes stored inside the event: a byte, a UTF-8 `char` or a framing symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InlineChars {
    bytes: [u8; 4],
    len: u8,
}

impl InlineChars {
    pub const MAX_LEN: usize = 4;

    /// A single raw byte.
    #[inline]
    pub const fn byte(b: u8) -> Self {
        Self {
            bytes: [b, 0, 0, 0],
            len: 1,
        }
    }

    /// The UTF-8 encoding of `c`.
    #[inline]
    pub fn char(c: char) -> Self {
        let mut bytes = [0u8; 4];
        let len = c.encode_utf8(&mut bytes).len() as u8;
        Self { bytes, len }
    }

    /// Copy 1..=4 bytes. Returns `None` for an empty or oversized input.
    pub const fn from_bytes(src: &[u8]) -> Option<Self> {
        if src.is_empty() || src.len() > Self::MAX_LEN {
            return None;
        }
        let mut bytes = [0u8; 4];
        let mut i = 0;
        while i < src.len() {
            bytes[i] = src[i];
            i += 1;
        }
        Some(Self {
            bytes,
            len: src.len() as u8,
        })
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl From<u8> for InlineChars {
    fn from(b: u8) -> Self {
        Self::byte(b)
    }
}

impl From<char> for InlineChars {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

/// The active interpretation of an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Borrowed text, written out as-is.
    Str(&'a [u8]),
    /// A standalone integer.
    Number(Number),
    /// One element of a logged array.
    Element(Number),
    /// A character captured at call time.
    Char(InlineChars),
    /// Start of a framed message, with an optional label.
    MessageStart(Option<&'a [u8]>),
    /// End of a framed message, with an optional label.
    MessageStop(Option<&'a [u8]>),
}

/// Flat event classification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    String,
    UnsignedDecimal,
    SignedDecimal,
    Hex,
    Char,
    ArrayElement,
    MessageStart,
    MessageStop,
}

/// One queued log item.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Event<'a> {
    pub payload: Payload<'a>,
    pub color: Color,
}

impl Event<'static> {
    /// Placeholder used to fill unused queue slots.
    pub const EMPTY: Event<'static> = Event {
        payload: Payload::Str(&[]),
        color: Color::None,
    };
}

impl<'a> Event<'a> {
    #[inline]
    pub const fn new(payload: Payload<'a>, color: Color) -> Self {
        Self { payload, color }
    }

    pub const fn kind(&self) -> EventKind {
        match self.payload {
            Payload::Str(_) => EventKind::String,
            Payload::Number(n) => match n.format {
                Format::Unsigned => EventKind::UnsignedDecimal,
                Format::Signed => EventKind::SignedDecimal,
                Format::Hex => EventKind::Hex,
            },
            Payload::Element(_) => EventKind::ArrayElement,
            Payload::Char(_) => EventKind::Char,
            Payload::MessageStart(_) => EventKind::MessageStart,
            Payload::MessageStop(_) => EventKind::MessageStop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_chars_from_utf8_char() {
        let c = InlineChars::char('é');
        assert_eq!(c.as_bytes(), "é".as_bytes());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn inline_chars_rejects_empty_and_oversized() {
        assert!(InlineChars::from_bytes(b"").is_none());
        assert!(InlineChars::from_bytes(b"12345").is_none());
        assert_eq!(InlineChars::from_bytes(b"\r\n").unwrap().as_bytes(), b"\r\n");
    }

    #[test]
    fn kind_follows_payload() {
        let n = Number {
            value: 5,
            width: Width::Two,
            format: Format::Signed,
        };
        assert_eq!(Event::new(Payload::Number(n), Color::None).kind(), EventKind::SignedDecimal);
        assert_eq!(Event::new(Payload::Element(n), Color::None).kind(), EventKind::ArrayElement);
        assert_eq!(Event::EMPTY.kind(), EventKind::String);
        assert_eq!(
            Event::new(Payload::MessageStop(None), Color::Red).kind(),
            EventKind::MessageStop
        );
    }

    #[test]
    fn width_selects_hex_digits() {
        assert_eq!(Width::One.hex_digits(), 2);
        assert_eq!(Width::Two.hex_digits(), 4);
        assert_eq!(Width::Four.hex_digits(), 8);
    }
}
