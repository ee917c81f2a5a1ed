//! Logger configuration.
//!
//! All settings are fixed once the [`Logger`](crate::Logger) is built; there is no runtime
//! reconfiguration. Queue capacity is a const generic on the logger, not a field here.

use thiserror::Error;

use crate::event::InlineChars;

/// Default input FIFO capacity, in events.
pub const DEFAULT_CAPACITY: usize = 256;

/// Default delay between periodic drain passes.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 100;

pub const DEFAULT_SEPARATOR: InlineChars = InlineChars::byte(b' ');

/// Written once at the start of a drain that follows dropped events.
pub const DEFAULT_OVERFLOW_MESSAGE: &[u8] = b"\r\n[log input overflowed]\r\n";

const DEFAULT_START_SYMBOL: InlineChars = InlineChars::byte(b'<');
const DEFAULT_STOP_SYMBOL: InlineChars = InlineChars::byte(b'>');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("poll interval must be at least 1 ms")]
    ZeroPollInterval,

    #[error("framing symbol is {len} bytes, at most 4 are stored inline")]
    SymbolTooLong { len: usize },

    #[error("framing symbol must not be empty")]
    EmptySymbol,
}

/// Where a message label goes relative to its framing symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelPosition {
    /// `<label` ... `label>`
    #[default]
    Inside,
    /// `label<` ... `>label`
    Outside,
}

/// Settings for the drain engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub poll_interval_ms: u32,
    pub separator: InlineChars,
    pub start_symbol: InlineChars,
    pub stop_symbol: InlineChars,
    pub label_position: LabelPosition,
    pub overflow_message: &'static [u8],
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LogConfig {
    pub const fn new() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            separator: DEFAULT_SEPARATOR,
            start_symbol: DEFAULT_START_SYMBOL,
            stop_symbol: DEFAULT_STOP_SYMBOL,
            label_position: LabelPosition::Inside,
            overflow_message: DEFAULT_OVERFLOW_MESSAGE,
        }
    }

    /// Frame messages with ASCII STX/ETX so a host-side parser can split the stream.
    pub const fn framed() -> Self {
        Self {
            start_symbol: InlineChars::byte(0x02),
            stop_symbol: InlineChars::byte(0x03),
            ..Self::new()
        }
    }

    pub const fn with_poll_interval(self, ms: u32) -> Result<Self, ConfigError> {
        if ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(Self {
            poll_interval_ms: ms,
            ..self
        })
    }

    pub const fn with_separator(self, separator: u8) -> Self {
        Self {
            separator: InlineChars::byte(separator),
            ..self
        }
    }

    pub const fn with_framing(self, start: &str, stop: &str) -> Result<Self, ConfigError> {
        let start_symbol = match symbol(start) {
            Ok(s) => s,
            Err(e) => return Err(e),
        };
        let stop_symbol = match symbol(stop) {
            Ok(s) => s,
            Err(e) => return Err(e),
        };
        Ok(Self {
            start_symbol,
            stop_symbol,
            ..self
        })
    }

    pub const fn with_label_position(self, label_position: LabelPosition) -> Self {
        Self {
            label_position,
            ..self
        }
    }

    pub const fn with_overflow_message(self, overflow_message: &'static [u8]) -> Self {
        Self {
            overflow_message,
            ..self
        }
    }
}

const fn symbol(s: &str) -> Result<InlineChars, ConfigError> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(ConfigError::EmptySymbol);
    }
    match InlineChars::from_bytes(bytes) {
        Some(sym) => Ok(sym),
        None => Err(ConfigError::SymbolTooLong { len: bytes.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_build_constants() {
        let cfg = LogConfig::default();
        assert_eq!(cfg.poll_interval_ms, 100);
        assert_eq!(cfg.separator.as_bytes(), b" ");
        assert_eq!(cfg.start_symbol.as_bytes(), b"<");
        assert_eq!(cfg.stop_symbol.as_bytes(), b">");
        assert_eq!(cfg.label_position, LabelPosition::Inside);
    }

    #[test]
    fn zero_poll_interval_rejected() {
        assert_eq!(
            LogConfig::new().with_poll_interval(0),
            Err(ConfigError::ZeroPollInterval)
        );
        assert_eq!(LogConfig::new().with_poll_interval(5).unwrap().poll_interval_ms, 5);
    }

    #[test]
    fn framing_symbols_validated() {
        assert_eq!(
            LogConfig::new().with_framing("<<<<<", ">"),
            Err(ConfigError::SymbolTooLong { len: 5 })
        );
        assert_eq!(
            LogConfig::new().with_framing("", ">"),
            Err(ConfigError::EmptySymbol)
        );
        let cfg = LogConfig::new().with_framing("{", "}\r\n").unwrap();
        assert_eq!(cfg.stop_symbol.as_bytes(), b"}\r\n");
    }

    #[test]
    fn framed_preset_uses_control_bytes() {
        let cfg = LogConfig::framed();
        assert_eq!(cfg.start_symbol.as_bytes(), &[0x02]);
        assert_eq!(cfg.stop_symbol.as_bytes(), &[0x03]);
        assert_eq!(cfg.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn error_messages_render() {
        use std::string::ToString;
        assert_eq!(
            ConfigError::SymbolTooLong { len: 6 }.to_string(),
            "framing symbol is 6 bytes, at most 4 are stored inline"
        );
    }
}
