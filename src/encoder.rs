//! Integer-to-text conversion into fixed stack buffers.
//!
//! # Rules
//! - Decimal: minimal digits, no leading zeros, `0` renders as `"0"`, `-` only for negative
//!   signed operands. Worst case is 11 bytes (`-2147483648`).
//! - Hexadecimal: always unsigned, uppercase, zero-padded to a digit count fixed by the
//!   operand width (2/4/8), no `0x` prefix.
//! - Nothing here allocates.

use crate::event::{Format, InlineChars, Number, Width};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Largest power of ten that fits in a `u32`.
const MAX_DIVIDER: u32 = 1_000_000_000;

/// Rendered decimal text (sign + up to 10 digits).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecimalText {
    buf: [u8; 11],
    len: u8,
}

impl DecimalText {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

/// Rendered hexadecimal text (up to 8 digits).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HexText {
    buf: [u8; 8],
    len: u8,
}

impl HexText {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

/// Reinterpret the low `width` bytes of `value` as a two's complement integer.
#[inline]
const fn sign_extend(value: u32, width: Width) -> i32 {
    match width {
        Width::One => value as u8 as i8 as i32,
        Width::Two => value as u16 as i16 as i32,
        Width::Four => value as i32,
    }
}

/// Render `value` in decimal.
///
/// With `signed` set, only the low `width` bytes are taken as the signed operand, so an
/// `i8`/`i16`/`i32` produces the same text whether or not it was sign-extended into the slot.
/// Unsigned operands use the full 32 bits.
pub fn decimal(value: u32, signed: bool, width: Width) -> DecimalText {
    let mut out = DecimalText {
        buf: [0; 11],
        len: 0,
    };
    let mut i = 0usize;

    let mut magnitude = value;
    if signed {
        let v = sign_extend(value, width);
        if v < 0 {
            out.buf[i] = b'-';
            i += 1;
        }
        magnitude = v.unsigned_abs();
    }

    if magnitude == 0 {
        out.buf[i] = b'0';
        i += 1;
    } else {
        let mut divider = MAX_DIVIDER;
        while magnitude < divider {
            divider /= 10;
        }
        // Walk every remaining power of ten so interior zeros are kept.
        while divider > 0 {
            out.buf[i] = b'0' + (magnitude / divider) as u8;
            i += 1;
            magnitude %= divider;
            divider /= 10;
        }
    }

    out.len = i as u8;
    out
}

/// Render the low `digits` nibbles of `value` as zero-padded uppercase hex.
///
/// `digits` is clamped to 1..=8.
pub fn hexadecimal(value: u32, digits: usize) -> HexText {
    let n = digits.clamp(1, 8);
    let mut out = HexText {
        buf: [b'0'; 8],
        len: n as u8,
    };
    let mut v = value;
    for slot in out.buf[..n].iter_mut().rev() {
        *slot = HEX_DIGITS[(v & 0x0F) as usize];
        v >>= 4;
    }
    out
}

/// Hex rendering with the digit count implied by the operand width.
#[inline]
pub fn hexadecimal_for(value: u32, width: Width) -> HexText {
    hexadecimal(value, width.hex_digits())
}

/// Characters pass through unchanged.
#[inline]
pub fn character(c: InlineChars) -> InlineChars {
    c
}

/// Text of a queued number, in whichever representation its format asks for.
pub enum NumberText {
    Decimal(DecimalText),
    Hex(HexText),
}

impl NumberText {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            NumberText::Decimal(t) => t.as_bytes(),
            NumberText::Hex(t) => t.as_bytes(),
        }
    }
}

pub fn number(n: Number) -> NumberText {
    match n.format {
        Format::Unsigned => NumberText::Decimal(decimal(n.value, false, n.width)),
        Format::Signed => NumberText::Decimal(decimal(n.value, true, n.width)),
        Format::Hex => NumberText::Hex(hexadecimal_for(n.value, n.width)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    fn dec(value: u32, signed: bool, width: Width) -> std::string::String {
        std::str::from_utf8(decimal(value, signed, width).as_bytes())
            .unwrap()
            .to_string()
    }

    fn hex(value: u32, digits: usize) -> std::string::String {
        std::str::from_utf8(hexadecimal(value, digits).as_bytes())
            .unwrap()
            .to_string()
    }

    #[test]
    fn zero_is_single_digit() {
        assert_eq!(dec(0, false, Width::Four), "0");
        assert_eq!(dec(0, true, Width::Four), "0");
    }

    #[test]
    fn unsigned_keeps_interior_zeros() {
        assert_eq!(dec(100, false, Width::Four), "100");
        assert_eq!(dec(1_000_000_007, false, Width::Four), "1000000007");
        assert_eq!(dec(12345, false, Width::Two), "12345");
    }

    #[test]
    fn unsigned_full_range_matches_core_formatting() {
        let samples = [
            1u32,
            9,
            10,
            99,
            101,
            65_535,
            999_999_999,
            1_000_000_000,
            4_000_000_000,
            u32::MAX,
        ];
        for v in samples {
            let text = dec(v, false, Width::Four);
            assert_eq!(text, v.to_string());
            assert_eq!(text.parse::<u32>().unwrap(), v);
            assert!(!text.starts_with('0'));
        }
    }

    #[test]
    fn signed_uses_operand_width() {
        assert_eq!(dec(-126i8 as u8 as u32, true, Width::One), "-126");
        assert_eq!(dec(-126i8 as i32 as u32, true, Width::One), "-126");
        assert_eq!(dec(-300i16 as u16 as u32, true, Width::Two), "-300");
        assert_eq!(dec(-1i32 as u32, true, Width::Four), "-1");
        assert_eq!(dec(127, true, Width::One), "127");
    }

    #[test]
    fn signed_minimums_render() {
        assert_eq!(dec(i8::MIN as u32, true, Width::One), "-128");
        assert_eq!(dec(i16::MIN as u32, true, Width::Two), "-32768");
        assert_eq!(dec(i32::MIN as u32, true, Width::Four), "-2147483648");
        assert_eq!(decimal(i32::MIN as u32, true, Width::Four).as_bytes().len(), 11);
    }

    #[test]
    fn hex_is_fixed_width_uppercase() {
        assert_eq!(hex(0x12, 2), "12");
        assert_eq!(hex(0x1234, 4), "1234");
        assert_eq!(hex(0, 8), "00000000");
        assert_eq!(hex(0x0F3E_00FF, 8), "0F3E00FF");
        assert_eq!(hex(0xAB, 4), "00AB");
    }

    #[test]
    fn hex_truncates_to_width() {
        // -1i8 sign-extended into the slot still prints two digits.
        assert_eq!(hexadecimal_for(-1i8 as i32 as u32, Width::One).as_bytes(), b"FF");
        assert_eq!(hexadecimal_for(0xDEAD_BEEF, Width::Two).as_bytes(), b"BEEF");
    }

    #[test]
    fn number_dispatches_on_format() {
        let n = Number {
            value: 0xFE,
            width: Width::One,
            format: Format::Signed,
        };
        assert_eq!(number(n).as_bytes(), b"-2");
        let n = Number {
            format: Format::Hex,
            ..n
        };
        assert_eq!(number(n).as_bytes(), b"FE");
        let n = Number {
            format: Format::Unsigned,
            ..n
        };
        assert_eq!(number(n).as_bytes(), b"254");
    }

    #[test]
    fn character_is_identity() {
        let c = InlineChars::byte(b'\r');
        assert_eq!(character(c), c);
    }
}
