//! Deferred text logging for no-std embedded targets.
//!
//! # Highlights
//! - Producers (threads or interrupt handlers) enqueue small tagged events: text by
//!   reference, characters, integers in decimal or fixed-width hex, arrays and message
//!   frames. Enqueueing costs one short critical section and never blocks.
//! - A single low-priority context drains the queue, renders text and writes it to a
//!   [`Backend`] byte sink.
//! - No allocation anywhere; integer rendering uses fixed stack buffers.
//!
//! # Quick start
//! ```
//! use ph_logq::{log_array_hex, log_dec, log_str, Backend, Color, LogConfig, Logger};
//!
//! struct Sink(Vec<u8>);
//! impl Backend for Sink {
//!     fn write(&mut self, bytes: &[u8]) {
//!         self.0.extend_from_slice(bytes);
//!     }
//! }
//!
//! let mut logger: Logger<'static, Sink, 64> = Logger::new(Sink(Vec::new()), LogConfig::new());
//! let log = logger.producer();
//!
//! log_str!(log, "t=");
//! log_dec!(log, -126i8);
//! log_str!(log, " regs=");
//! log_array_hex!(log, &[0x0Fu8, 0xA0]);
//! log_str!(log, "\r\n", Color::None);
//!
//! let stats = logger.flush().unwrap();
//! assert_eq!(stats.events, 7);
//! assert_eq!(logger.backend_mut().0, b"t=-126 regs=0F A0\r\n");
//! ```
//!
//! # No-std
//! The crate is `#![no_std]`. It relies on the `critical-section` crate: bare-metal users
//! link their platform's implementation, hosted users enable the `std` feature.
//!
//! # Features
//! - `ansi-color` (default): emit ANSI color directives. When off, color arguments are
//!   accepted and ignored.
//! - `std`: `critical-section` std implementation and [`StdDelay`].
//! - `log`: report overflows and drain passes through the `log` facade.
//! - `portable-atomic*`: atomics for cores without compare-and-swap.
//!
//! # Semantics
//! - A full queue drops the *new* event; the next drain starts with an overflow notice.
//! - FIFO order holds per producer context; interleaving across contexts is whatever
//!   order the enqueues actually ran in. Arrays are not enqueued atomically.
//! - Text must outlive the logger's `'a`; for a `static` logger that means `'static` text.
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
mod diag;

mod atomic;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod drain;
pub mod encoder;
pub mod event;
pub mod producer;
pub mod queue;

pub use color::Color;
pub use config::{ConfigError, DEFAULT_CAPACITY, DEFAULT_POLL_INTERVAL_MS, LabelPosition, LogConfig};
pub use dispatch::{LogChar, Loggable};
#[cfg(feature = "std")]
pub use drain::StdDelay;
pub use drain::{Backend, CallbackBackend, Delay, DrainState, DrainStats, FlushError, Logger};
pub use event::{Event, EventKind, Format, InlineChars, Number, Payload, Width};
pub use producer::Producer;
pub use queue::EventQueue;
