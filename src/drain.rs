//! Drain/flush engine: turns queued events into text and hands it to the backend.
//!
//! # Overview
//! - [`Logger`] owns the input FIFO, the [`Backend`] and the [`LogConfig`]. Build it once
//!   (usually in a `static`) and pass references to producers and to the drain context.
//! - The periodic drain ([`Logger::run`]) is the steady-state consumer: one pass, then a
//!   fixed sleep, forever.
//! - [`Logger::flush`] drains synchronously from any context, e.g. before a reset, and then
//!   calls [`Backend::flush`].
//!
//! # States
//! `Idle` → `Draining` on a timer tick or an explicit flush; `Draining` → `Idle` when the
//! FIFO is empty. A drain is claimed with a compare-exchange on one flag, so a periodic
//! pass and an explicit flush never consume concurrently: whichever arrives second gets
//! [`FlushError::Busy`].
//!
//! # Output per event
//! color directive (if any) → event text. A pass that follows dropped events starts with
//! the configured overflow message.

use core::cell::UnsafeCell;

use thiserror::Error;

use crate::atomic::{AtomicBool, Ordering};
use crate::color::{self, Color};
use crate::config::{DEFAULT_CAPACITY, LabelPosition, LogConfig};
use crate::encoder;
use crate::event::{Event, Payload};
use crate::producer::Producer;
use crate::queue::EventQueue;

/// Byte sink for formatted output (serial port, USB CDC, file, ...).
pub trait Backend {
    /// Called once per formatted fragment. Must not block indefinitely.
    fn write(&mut self, bytes: &[u8]);

    /// Push out anything the backend buffers itself. Called once after an explicit flush.
    fn flush(&mut self) {}
}

impl<B: Backend + ?Sized> Backend for &mut B {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes)
    }

    #[inline]
    fn flush(&mut self) {
        (**self).flush()
    }
}

/// Backend built from plain function pointers.
#[derive(Copy, Clone)]
pub struct CallbackBackend {
    write: fn(&[u8]),
    flush: Option<fn()>,
}

impl CallbackBackend {
    pub const fn new(write: fn(&[u8]), flush: Option<fn()>) -> Self {
        Self { write, flush }
    }
}

impl Backend for CallbackBackend {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        (self.write)(bytes)
    }

    #[inline]
    fn flush(&mut self) {
        if let Some(flush) = self.flush {
            flush()
        }
    }
}

/// Sleep primitive supplied by the scheduler that runs the periodic drain.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// [`Delay`] backed by `std::thread::sleep`.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlushError {
    #[error("another context is already draining the log queue")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainState {
    Idle,
    Draining,
}

#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainStats {
    /// Events written out in this pass.
    pub events: usize,
    /// Events dropped since the previous pass.
    pub dropped: u32,
}

/// Input FIFO plus the single consumer that formats it.
pub struct Logger<'a, B: Backend, const N: usize = DEFAULT_CAPACITY> {
    queue: EventQueue<'a, N>,
    backend: UnsafeCell<B>,
    draining: AtomicBool,
    config: LogConfig,
}

// SAFETY: `backend` is only touched by the context that holds `draining` (or through
// `&mut self`), so it is never aliased across threads. The queue is `Sync` on its own.
unsafe impl<B: Backend + Send, const N: usize> Sync for Logger<'_, B, N> {}

impl<const N: usize> Logger<'_, CallbackBackend, N> {
    /// Build a logger around a write callback and an optional flush callback.
    pub const fn init(write: fn(&[u8]), flush: Option<fn()>) -> Self {
        Self::new(CallbackBackend::new(write, flush), LogConfig::new())
    }
}

impl<'a, B: Backend, const N: usize> Logger<'a, B, N> {
    pub const fn new(backend: B, config: LogConfig) -> Self {
        Self {
            queue: EventQueue::new(),
            backend: UnsafeCell::new(backend),
            draining: AtomicBool::new(false),
            config,
        }
    }

    /// Handle for enqueueing events, using the configured array separator.
    #[inline]
    pub fn producer(&self) -> Producer<'_, 'a, N> {
        Producer::new(&self.queue, self.config.separator)
    }

    #[inline]
    pub fn queue(&self) -> &EventQueue<'a, N> {
        &self.queue
    }

    #[inline]
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Exclusive access to the backend, e.g. to inspect captured output.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        self.backend.get_mut()
    }

    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }

    #[inline]
    pub fn state(&self) -> DrainState {
        if self.draining.load(Ordering::Acquire) {
            DrainState::Draining
        } else {
            DrainState::Idle
        }
    }

    /// Drain the FIFO completely in the calling context and flush the backend.
    #[inline]
    pub fn flush(&self) -> Result<DrainStats, FlushError> {
        self.flush_once(true)
    }

    /// One drain pass. `explicit` additionally calls [`Backend::flush`] at the end.
    pub fn flush_once(&self, explicit: bool) -> Result<DrainStats, FlushError> {
        if self
            .draining
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            diag_debug!("log drain refused: already draining");
            return Err(FlushError::Busy);
        }

        // SAFETY: the `draining` flag is held, so this is the only live reference.
        let backend = unsafe { &mut *self.backend.get() };
        let stats = self.drain_into(backend, explicit);

        self.draining.store(false, Ordering::Release);
        diag_trace!("log drain: {} events, {} dropped", stats.events, stats.dropped);
        Ok(stats)
    }

    fn drain_into(&self, backend: &mut B, explicit: bool) -> DrainStats {
        let dropped = self.queue.take_dropped();
        if dropped > 0 {
            diag_warn!("log input queue overflowed, {} events dropped", dropped);
            backend.write(self.config.overflow_message);
        }

        let mut events = 0;
        while let Some(event) = self.queue.get() {
            self.render(backend, &event);
            events += 1;
        }

        if explicit {
            backend.flush();
        }

        DrainStats { events, dropped }
    }

    fn render(&self, backend: &mut B, event: &Event<'a>) {
        if let Some(seq) = color::escape(event.color) {
            backend.write(seq.as_bytes());
        }

        match event.payload {
            Payload::Str(text) => backend.write(text),
            Payload::Number(n) | Payload::Element(n) => {
                backend.write(encoder::number(n).as_bytes())
            }
            Payload::Char(c) => backend.write(encoder::character(c).as_bytes()),
            Payload::MessageStart(label) => {
                let symbol = self.config.start_symbol;
                self.frame(backend, symbol.as_bytes(), label, LabelPosition::Inside)
            }
            Payload::MessageStop(label) => {
                let symbol = self.config.stop_symbol;
                self.frame(backend, symbol.as_bytes(), label, LabelPosition::Outside)
            }
        }
    }

    /// Write `symbol` and `label`; the label follows the symbol when the configured
    /// position equals `label_after`.
    fn frame(
        &self,
        backend: &mut B,
        symbol: &[u8],
        label: Option<&[u8]>,
        label_after: LabelPosition,
    ) {
        match label {
            Some(label) if self.config.label_position == label_after => {
                backend.write(symbol);
                backend.write(label);
            }
            Some(label) => {
                backend.write(label);
                backend.write(symbol);
            }
            None => backend.write(symbol),
        }
    }

    /// One periodic step: drain without flushing the backend, then sleep for the poll
    /// interval. A pass that finds an explicit flush in progress is skipped.
    pub fn poll<D: Delay>(&self, delay: &mut D) -> Option<DrainStats> {
        let stats = self.flush_once(false).ok();
        delay.delay_ms(self.config.poll_interval_ms);
        stats
    }

    /// Body of the low-priority drain thread. Never returns.
    pub fn run<D: Delay>(&self, delay: &mut D) -> ! {
        loop {
            let _ = self.poll(delay);
        }
    }
}

/// Emit a reset sequence if the terminal may have been left colored.
///
/// Convenience for shutdown paths; writes nothing when colorization is compiled out.
pub fn reset_color<B: Backend>(backend: &mut B) {
    if color::escape(Color::Default).is_some() {
        backend.write(&color::RESET);
    }
}
