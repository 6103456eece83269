//! Crate-level error types.
//!
//! Picking itself never fails: degenerate inputs resolve to "no selection
//! change". Only the file-backed surfaces (options presets and fixture
//! scenes) can produce errors.

use std::fmt;

/// Errors produced by the scenepick crate.
#[derive(Debug)]
pub enum PickError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Fixture scene parsing failure.
    SceneParse(String),
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::SceneParse(msg) => write!(f, "scene parse error: {msg}"),
        }
    }
}

impl std::error::Error for PickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PickError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
