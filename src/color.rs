//! ANSI colorization of drained events.
//!
//! A color directive is written immediately before the event text and is never followed
//! by a reset: the terminal keeps the color until the next directive.
//!
//! With the `ansi-color` feature disabled every [`Color`] is accepted at call sites but
//! [`escape`] always returns `None`.

/// Per-event color tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    /// Emit no directive at all.
    #[default]
    None,
    /// Reset to the terminal default.
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

const ANSI_PREFIX: [u8; 2] = [0x1B, b'['];
const ANSI_SUFFIX: u8 = b'm';

/// Foreground codes indexed by `Color as u8 - 1`; `Default` uses the one-char code `0`.
#[cfg(feature = "ansi-color")]
const ANSI_CODES: [[u8; 2]; 9] = [
    [b'0', b' '],
    [b'3', b'0'],
    [b'3', b'1'],
    [b'3', b'2'],
    [b'3', b'3'],
    [b'3', b'4'],
    [b'3', b'5'],
    [b'3', b'6'],
    [b'3', b'7'],
];

/// A complete escape sequence, at most `ESC [ c c m`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnsiSeq {
    buf: [u8; 5],
    len: u8,
}

impl AnsiSeq {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

/// Escape sequence to emit before an event tagged `color`, if any.
#[cfg(feature = "ansi-color")]
pub fn escape(color: Color) -> Option<AnsiSeq> {
    let idx = match color {
        Color::None => return None,
        c => c as usize - 1,
    };
    let code = ANSI_CODES[idx];
    let mut buf = [ANSI_PREFIX[0], ANSI_PREFIX[1], code[0], 0, 0];
    let len = if color == Color::Default {
        buf[3] = ANSI_SUFFIX;
        4
    } else {
        buf[3] = code[1];
        buf[4] = ANSI_SUFFIX;
        5
    };
    Some(AnsiSeq { buf, len })
}

#[cfg(not(feature = "ansi-color"))]
#[inline(always)]
pub fn escape(_color: Color) -> Option<AnsiSeq> {
    None
}

/// Sequence that resets the terminal to its default attributes.
pub const RESET: [u8; 4] = [ANSI_PREFIX[0], ANSI_PREFIX[1], b'0', ANSI_SUFFIX];
