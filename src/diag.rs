//! Internal diagnostics routed to the `log` facade when the `log` feature is enabled.
//! Without it these expand to nothing and no facade is linked.

#[cfg(feature = "log")]
macro_rules! diag_warn {
    ($($arg:tt)*) => { log::warn!(target: "ph_logq", $($arg)*) };
}

#[cfg(feature = "log")]
macro_rules! diag_debug {
    ($($arg:tt)*) => { log::debug!(target: "ph_logq", $($arg)*) };
}

#[cfg(feature = "log")]
macro_rules! diag_trace {
    ($($arg:tt)*) => { log::trace!(target: "ph_logq", $($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! diag_warn {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "log"))]
macro_rules! diag_debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "log"))]
macro_rules! diag_trace {
    ($($arg:tt)*) => {{}};
}
