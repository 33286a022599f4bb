//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: palette error (bad range, bad count, history index out of range)
//! - 11: I/O error (data directory, config file, storage writes)
//! - 12: input error (bad color, unknown mode or format)
//! - 13: serialization error

use palette_forge_core::PaletteError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A core palette error not covered by the other variants.
    Palette(PaletteError),
    /// An I/O or storage error.
    Io(String),
    /// A user input error (unparseable color, unknown mode or format).
    Input(String),
    /// A serialization error (JSON output or config parsing).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Palette(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Palette(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<PaletteError> for CliError {
    fn from(e: PaletteError) -> Self {
        match e {
            PaletteError::Storage(msg) => CliError::Io(msg),
            PaletteError::Serialization(msg) => CliError::Serialization(msg),
            e @ (PaletteError::InvalidColor(_)
            | PaletteError::UnknownMode(_)
            | PaletteError::UnknownFormat(_)) => CliError::Input(e.to_string()),
            other => CliError::Palette(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
