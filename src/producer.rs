//! Producer handle: the fire-and-forget enqueue API.
//!
//! Every method returns `true` if all of its events were queued and `false` if any was
//! dropped. Callers are free to ignore the result; nothing here blocks or panics, so any
//! method may be called from interrupt context.

use crate::color::Color;
use crate::config::DEFAULT_SEPARATOR;
use crate::dispatch::{LogChar, Loggable};
use crate::event::{Event, InlineChars, Number, Payload};
use crate::queue::EventQueue;

/// Cheap, copyable handle for enqueueing log events.
#[derive(Copy, Clone)]
pub struct Producer<'q, 'a, const N: usize> {
    queue: &'q EventQueue<'a, N>,
    separator: InlineChars,
}

impl<'a, const N: usize> EventQueue<'a, N> {
    /// Create a producer that separates array items with a space.
    #[inline]
    pub fn producer(&self) -> Producer<'_, 'a, N> {
        Producer::new(self, DEFAULT_SEPARATOR)
    }
}

impl<'q, 'a, const N: usize> Producer<'q, 'a, N> {
    #[inline]
    pub fn new(queue: &'q EventQueue<'a, N>, separator: InlineChars) -> Self {
        Self { queue, separator }
    }

    /// The separator used by [`array_dec`](Self::array_dec) and [`array_hex`](Self::array_hex).
    #[inline]
    pub fn separator(&self) -> InlineChars {
        self.separator
    }

    #[inline]
    fn put(&self, payload: Payload<'a>, color: Color) -> bool {
        self.queue.put(Event::new(payload, color))
    }

    /// Log text by reference. The bytes are not copied.
    #[inline]
    pub fn str<S: AsRef<[u8]> + ?Sized>(&self, text: &'a S, color: Color) -> bool {
        self.put(Payload::Str(text.as_ref()), color)
    }

    #[inline]
    pub fn char<C: LogChar>(&self, chr: C, color: Color) -> bool {
        self.put(Payload::Char(chr.to_inline()), color)
    }

    #[inline]
    pub fn dec<T: Loggable>(&self, value: T, color: Color) -> bool {
        self.put(Payload::Number(value.decimal()), color)
    }

    #[inline]
    pub fn hex<T: Loggable>(&self, value: T, color: Color) -> bool {
        self.put(Payload::Number(value.hex()), color)
    }

    #[inline]
    pub fn array_dec<T: Loggable>(&self, items: &[T], color: Color) -> bool {
        self.emit_array(items, Loggable::decimal, self.separator, color)
    }

    #[inline]
    pub fn array_hex<T: Loggable>(&self, items: &[T], color: Color) -> bool {
        self.emit_array(items, Loggable::hex, self.separator, color)
    }

    #[inline]
    pub fn array_dec_sep<T: Loggable, C: LogChar>(&self, items: &[T], separator: C, color: Color) -> bool {
        self.emit_array(items, Loggable::decimal, separator.to_inline(), color)
    }

    #[inline]
    pub fn array_hex_sep<T: Loggable, C: LogChar>(&self, items: &[T], separator: C, color: Color) -> bool {
        self.emit_array(items, Loggable::hex, separator.to_inline(), color)
    }

    /// Enqueue each element followed by a separator, except after the last one.
    ///
    /// Elements are read at call time. The array is not enqueued atomically: events from
    /// another context may land between its items.
    fn emit_array<T: Loggable>(
        &self,
        items: &[T],
        encode: fn(T) -> Number,
        separator: InlineChars,
        color: Color,
    ) -> bool {
        let mut all_queued = true;
        let last = items.len().saturating_sub(1);
        for (i, &item) in items.iter().enumerate() {
            all_queued &= self.put(Payload::Element(encode(item)), color);
            if i != last {
                all_queued &= self.put(Payload::Char(separator), Color::None);
            }
        }
        all_queued
    }

    #[inline]
    pub fn message_start(&self, label: Option<&'a str>, color: Color) -> bool {
        self.put(Payload::MessageStart(label.map(str::as_bytes)), color)
    }

    #[inline]
    pub fn message_stop(&self, label: Option<&'a str>, color: Color) -> bool {
        self.put(Payload::MessageStop(label.map(str::as_bytes)), color)
    }
}
