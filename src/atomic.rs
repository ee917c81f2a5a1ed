//! Atomic types used by the drain guard.
//!
//! Cores without native compare-and-swap (thumbv6m, riscv32imc) select one of the
//! `portable-atomic*` features.

#[cfg(feature = "portable-atomic")]
pub(crate) use portable_atomic::{AtomicBool, Ordering};

#[cfg(not(feature = "portable-atomic"))]
pub(crate) use core::sync::atomic::{AtomicBool, Ordering};
