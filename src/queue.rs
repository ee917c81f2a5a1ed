//! Bounded, interrupt-safe input FIFO of [`Event`]s.
//!
//! # Overview
//! - Many producers (threads and interrupt handlers), one consumer (the drain).
//! - `put` never blocks: when the FIFO is full the new event is dropped and counted.
//!   The oldest entries are never overwritten.
//! - `get` never blocks: it returns `None` when the FIFO is empty.
//! - Capacity `N` is a power of two so indices wrap with a mask. This is checked at
//!   compile time when the queue is constructed.
//!
//! # Exclusion
//! Every access runs inside [`critical_section::with`], which masks preemption on bare
//! metal and takes a process-wide lock on hosted targets. The section covers only the
//! bounds check, one slot copy and the index update.
//!
//! # Ordering
//! Events put by one context without intervening preemption are drained in that order.
//! Across contexts, order is whatever order the `put` calls happened to run in.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::event::Event;

struct Ring<'a, const N: usize> {
    slots: [Event<'a>; N],
    write_idx: usize,
    read_idx: usize,
    count: usize,
    dropped: u32,
}

impl<'a, const N: usize> Ring<'a, N> {
    const MASK: usize = N - 1;

    #[inline(always)]
    fn push(&mut self, event: Event<'a>) -> bool {
        if self.count == N {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        self.slots[self.write_idx] = event;
        self.write_idx = (self.write_idx + 1) & Self::MASK;
        self.count += 1;
        true
    }

    #[inline(always)]
    fn pop(&mut self) -> Option<Event<'a>> {
        if self.count == 0 {
            return None;
        }
        let event = self.slots[self.read_idx];
        self.read_idx = (self.read_idx + 1) & Self::MASK;
        self.count -= 1;
        Some(event)
    }
}

/// Fixed-capacity FIFO shared by all producers and the single drain context.
pub struct EventQueue<'a, const N: usize> {
    ring: Mutex<RefCell<Ring<'a, N>>>,
}

impl<'a, const N: usize> EventQueue<'a, N> {
    const CAPACITY_IS_POWER_OF_TWO: () = assert!(
        N.is_power_of_two(),
        "log input queue capacity must be a power of 2"
    );

    /// Create an empty queue.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_IS_POWER_OF_TWO;
        Self {
            ring: Mutex::new(RefCell::new(Ring {
                slots: [Event::EMPTY; N],
                write_idx: 0,
                read_idx: 0,
                count: 0,
                dropped: 0,
            })),
        }
    }

    /// Enqueue `event`. Returns `false` if the queue was full and the event was dropped.
    ///
    /// Safe from interrupt context; O(1).
    #[inline]
    pub fn put(&self, event: Event<'a>) -> bool {
        critical_section::with(|cs| self.ring.borrow_ref_mut(cs).push(event))
    }

    /// Dequeue the oldest event, or `None` if empty.
    ///
    /// Only the drain context may call this.
    #[inline]
    pub fn get(&self) -> Option<Event<'a>> {
        critical_section::with(|cs| self.ring.borrow_ref_mut(cs).pop())
    }

    /// Discard all pending events and clear the drop counter.
    pub fn reset(&self) {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            ring.write_idx = 0;
            ring.read_idx = 0;
            ring.count = 0;
            ring.dropped = 0;
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.ring.borrow_ref(cs).count)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Events dropped since the last [`take_dropped`](Self::take_dropped).
    #[inline]
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.ring.borrow_ref(cs).dropped)
    }

    /// Read and clear the drop counter in one critical section.
    #[inline]
    pub fn take_dropped(&self) -> u32 {
        critical_section::with(|cs| core::mem::take(&mut self.ring.borrow_ref_mut(cs).dropped))
    }
}

impl<const N: usize> Default for EventQueue<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::EventQueue;
    use crate::color::Color;
    use crate::event::{Event, Format, Number, Payload, Width};
    use std::vec::Vec;

    fn num(v: u32) -> Event<'static> {
        Event::new(
            Payload::Number(Number {
                value: v,
                width: Width::Four,
                format: Format::Unsigned,
            }),
            Color::None,
        )
    }

    fn value_of(e: Event<'_>) -> u32 {
        match e.payload {
            Payload::Number(n) => n.value,
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn get_empty_returns_none() {
        let q = EventQueue::<4>::new();
        assert!(q.get().is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn drains_in_fifo_order() {
        let q = EventQueue::<8>::new();
        for v in [10, 11, 12] {
            assert!(q.put(num(v)));
        }
        assert_eq!(q.len(), 3);

        let mut seen = Vec::new();
        while let Some(e) = q.get() {
            seen.push(value_of(e));
        }
        assert_eq!(&seen[..], &[10, 11, 12]);
    }

    #[test]
    fn fifo_order_survives_wraparound() {
        let q = EventQueue::<4>::new();
        let mut seen = Vec::new();
        for round in 0..5u32 {
            for i in 0..3 {
                assert!(q.put(num(round * 10 + i)));
            }
            while let Some(e) = q.get() {
                seen.push(value_of(e));
            }
        }
        let expected: Vec<u32> = (0..5u32).flat_map(|r| (0..3).map(move |i| r * 10 + i)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn put_on_full_drops_newest_without_overwrite() {
        let q = EventQueue::<4>::new();
        for v in 1..=4 {
            assert!(q.put(num(v)));
        }
        assert!(q.is_full());

        assert!(!q.put(num(5)));
        assert_eq!(q.len(), 4);
        assert_eq!(q.dropped(), 1);

        let mut seen = Vec::new();
        while let Some(e) = q.get() {
            seen.push(value_of(e));
        }
        assert_eq!(&seen[..], &[1, 2, 3, 4]);
    }

    #[test]
    fn take_dropped_clears_counter() {
        let q = EventQueue::<2>::new();
        q.put(num(1));
        q.put(num(2));
        q.put(num(3));
        q.put(num(4));
        assert_eq!(q.take_dropped(), 2);
        assert_eq!(q.dropped(), 0);
    }

    #[test]
    fn reset_empties_queue() {
        let q = EventQueue::<4>::new();
        q.put(num(1));
        q.put(num(2));
        q.reset();
        assert!(q.is_empty());
        assert!(q.get().is_none());
        assert!(q.put(num(3)));
        assert_eq!(value_of(q.get().unwrap()), 3);
    }

    #[test]
    fn concurrent_producers_lose_nothing_within_capacity() {
        use std::sync::Arc;
        use std::thread;

        let q: Arc<EventQueue<'static, 64>> = Arc::new(EventQueue::new());
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    for i in 0..10 {
                        assert!(q.put(num(t * 100 + i)));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let mut seen = Vec::new();
        while let Some(e) = q.get() {
            seen.push(value_of(e));
        }
        assert_eq!(seen.len(), 40);

        // Per-producer order is preserved.
        for t in 0..4u32 {
            let mine: Vec<u32> = seen.iter().copied().filter(|v| v / 100 == t).collect();
            let expected: Vec<u32> = (0..10).map(|i| t * 100 + i).collect();
            assert_eq!(mine, expected);
        }
    }

    #[test]
    fn concurrent_overflow_accounts_for_every_put() {
        use std::sync::Arc;
        use std::thread;

        let q: Arc<EventQueue<'static, 16>> = Arc::new(EventQueue::new());
        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    for i in 0..50 {
                        let _ = q.put(num(t * 100 + i));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(q.len(), 16);
        assert_eq!(q.dropped() as usize, 8 * 50 - 16);
    }
}
