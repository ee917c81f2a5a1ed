//! Static type-to-event mapping and the call-site macros.
//!
//! The operand type picks the event variant at compile time: signed types log with a
//! sign, unsigned types without, and the hex digit count follows the type width
//! (`u8`/`i8` → 2, `u16`/`i16` → 4, `u32`/`i32` → 8). There is no runtime type tag.
//!
//! Every macro takes an optional trailing [`Color`](crate::Color); omitting it is the same
//! as passing `Color::None`. The `logc_*` forms take a condition first and evaluate
//! neither the value nor the enqueue when the condition is false.

use crate::event::{Format, InlineChars, Number, Width};

mod sealed {
    pub trait Sealed {}
}

/// Integer types that can be logged in decimal or hexadecimal.
pub trait Loggable: Copy + sealed::Sealed {
    const WIDTH: Width;
    const SIGNED: bool;

    /// The value widened into a 32-bit slot (sign-extended for signed types).
    fn to_bits(self) -> u32;

    #[inline(always)]
    fn decimal(self) -> Number {
        Number {
            value: self.to_bits(),
            width: Self::WIDTH,
            format: if Self::SIGNED {
                Format::Signed
            } else {
                Format::Unsigned
            },
        }
    }

    #[inline(always)]
    fn hex(self) -> Number {
        Number {
            value: self.to_bits(),
            width: Self::WIDTH,
            format: Format::Hex,
        }
    }
}

macro_rules! impl_loggable {
    ($($t:ty => $width:expr, $signed:expr;)*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Loggable for $t {
                const WIDTH: Width = $width;
                const SIGNED: bool = $signed;

                #[inline(always)]
                fn to_bits(self) -> u32 {
                    self as i64 as u32
                }
            }
        )*
    };
}

impl_loggable! {
    u8 => Width::One, false;
    u16 => Width::Two, false;
    u32 => Width::Four, false;
    i8 => Width::One, true;
    i16 => Width::Two, true;
    i32 => Width::Four, true;
}

#[cfg(target_pointer_width = "16")]
impl_loggable! {
    usize => Width::Two, false;
    isize => Width::Two, true;
}

#[cfg(target_pointer_width = "32")]
impl_loggable! {
    usize => Width::Four, false;
    isize => Width::Four, true;
}

/// Types that log as a single character.
pub trait LogChar: Copy {
    fn to_inline(self) -> InlineChars;
}

impl LogChar for u8 {
    #[inline(always)]
    fn to_inline(self) -> InlineChars {
        InlineChars::byte(self)
    }
}

impl LogChar for char {
    #[inline(always)]
    fn to_inline(self) -> InlineChars {
        InlineChars::char(self)
    }
}

/// Log borrowed text.
///
/// ```ignore
/// log_str!(p, "boot\r\n");
/// log_str!(p, "FAULT\r\n", Color::Red);
/// ```
#[macro_export]
macro_rules! log_str {
    ($p:expr, $text:expr $(,)?) => {
        $p.str($text, $crate::Color::None)
    };
    ($p:expr, $text:expr, $color:expr $(,)?) => {
        $p.str($text, $color)
    };
}

/// Log one character; the value is read at call time.
#[macro_export]
macro_rules! log_char {
    ($p:expr, $chr:expr $(,)?) => {
        $p.char($chr, $crate::Color::None)
    };
    ($p:expr, $chr:expr, $color:expr $(,)?) => {
        $p.char($chr, $color)
    };
}

/// Log an integer in decimal, signed or unsigned per its type.
#[macro_export]
macro_rules! log_dec {
    ($p:expr, $num:expr $(,)?) => {
        $p.dec($num, $crate::Color::None)
    };
    ($p:expr, $num:expr, $color:expr $(,)?) => {
        $p.dec($num, $color)
    };
}

/// Log an integer in fixed-width hexadecimal.
#[macro_export]
macro_rules! log_hex {
    ($p:expr, $num:expr $(,)?) => {
        $p.hex($num, $crate::Color::None)
    };
    ($p:expr, $num:expr, $color:expr $(,)?) => {
        $p.hex($num, $color)
    };
}

/// Log a slice of integers in decimal, separated by the configured separator.
#[macro_export]
macro_rules! log_array_dec {
    ($p:expr, $items:expr $(,)?) => {
        $p.array_dec($items, $crate::Color::None)
    };
    ($p:expr, $items:expr, $color:expr $(,)?) => {
        $p.array_dec($items, $color)
    };
}

/// Log a slice of integers in hexadecimal, separated by the configured separator.
#[macro_export]
macro_rules! log_array_hex {
    ($p:expr, $items:expr $(,)?) => {
        $p.array_hex($items, $crate::Color::None)
    };
    ($p:expr, $items:expr, $color:expr $(,)?) => {
        $p.array_hex($items, $color)
    };
}

/// Open a framed message, optionally labelled.
#[macro_export]
macro_rules! log_msg_start {
    ($p:expr $(,)?) => {
        $p.message_start(None, $crate::Color::None)
    };
    ($p:expr, $label:expr $(,)?) => {
        $p.message_start(Some($label), $crate::Color::None)
    };
    ($p:expr, $label:expr, $color:expr $(,)?) => {
        $p.message_start(Some($label), $color)
    };
}

/// Close a framed message, optionally labelled.
#[macro_export]
macro_rules! log_msg_stop {
    ($p:expr $(,)?) => {
        $p.message_stop(None, $crate::Color::None)
    };
    ($p:expr, $label:expr $(,)?) => {
        $p.message_stop(Some($label), $crate::Color::None)
    };
    ($p:expr, $label:expr, $color:expr $(,)?) => {
        $p.message_stop(Some($label), $color)
    };
}

#[macro_export]
macro_rules! logc_str {
    ($cond:expr, $p:expr, $($rest:tt)+) => {
        if $cond {
            let _ = $crate::log_str!($p, $($rest)+);
        }
    };
}

#[macro_export]
macro_rules! logc_char {
    ($cond:expr, $p:expr, $($rest:tt)+) => {
        if $cond {
            let _ = $crate::log_char!($p, $($rest)+);
        }
    };
}

#[macro_export]
macro_rules! logc_dec {
    ($cond:expr, $p:expr, $($rest:tt)+) => {
        if $cond {
            let _ = $crate::log_dec!($p, $($rest)+);
        }
    };
}

#[macro_export]
macro_rules! logc_hex {
    ($cond:expr, $p:expr, $($rest:tt)+) => {
        if $cond {
            let _ = $crate::log_hex!($p, $($rest)+);
        }
    };
}

#[macro_export]
macro_rules! logc_array_dec {
    ($cond:expr, $p:expr, $($rest:tt)+) => {
        if $cond {
            let _ = $crate::log_array_dec!($p, $($rest)+);
        }
    };
}

#[macro_export]
macro_rules! logc_array_hex {
    ($cond:expr, $p:expr, $($rest:tt)+) => {
        if $cond {
            let _ = $crate::log_array_hex!($p, $($rest)+);
        }
    };
}
