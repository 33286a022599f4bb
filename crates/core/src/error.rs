//! Error types for the palette-forge core.

use thiserror::Error;

/// Errors produced by palette operations.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// A channel range had `min > max` or a bound above the channel limit.
    #[error("invalid {channel} range: {min}..={max}")]
    InvalidRange {
        channel: &'static str,
        min: u16,
        max: u16,
    },

    /// A palette was requested with zero colors.
    #[error("invalid color count: {0} (must be at least 1)")]
    InvalidCount(usize),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A generation mode name was not recognized.
    #[error("unknown generation mode: {0}")]
    UnknownMode(String),

    /// An export format name was not recognized.
    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    /// A history position past the end of the history list.
    #[error("history index {index} out of range (history has {len} entries)")]
    HistoryIndex { index: usize, len: usize },

    /// The key-value store failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PaletteError {
    fn from(e: serde_json::Error) -> Self {
        PaletteError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_includes_channel_and_bounds() {
        let err = PaletteError::InvalidRange {
            channel: "saturation",
            min: 90,
            max: 30,
        };
        let msg = format!("{err}");
        assert!(msg.contains("saturation"), "missing channel in: {msg}");
        assert!(msg.contains("90"), "missing min in: {msg}");
        assert!(msg.contains("30"), "missing max in: {msg}");
    }

    #[test]
    fn invalid_count_includes_value() {
        let msg = format!("{}", PaletteError::InvalidCount(0));
        assert!(msg.contains('0'), "missing count in: {msg}");
    }

    #[test]
    fn unknown_mode_includes_name() {
        let msg = format!("{}", PaletteError::UnknownMode("spiral".into()));
        assert!(msg.contains("spiral"), "missing name in: {msg}");
    }

    #[test]
    fn history_index_includes_index_and_len() {
        let err = PaletteError::HistoryIndex { index: 7, len: 3 };
        let msg = format!("{err}");
        assert!(msg.contains('7'), "missing index in: {msg}");
        assert!(msg.contains('3'), "missing len in: {msg}");
    }

    #[test]
    fn serde_json_error_converts_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = PaletteError::from(bad);
        assert!(matches!(err, PaletteError::Serialization(_)));
    }

    #[test]
    fn palette_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PaletteError>();
    }

    #[test]
    fn palette_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<PaletteError>();
    }
}
