//! Error types for the theme_colors library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for theme_colors operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for color parsing and palette analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Hex color string is malformed (non-hex characters or wrong length)
    #[error("invalid hex color format: {input:?} ({reason})")]
    InvalidFormat { input: String, reason: String },

    /// A composed analysis received an invalid color input
    #[error("invalid color {input:?} for {context}")]
    InvalidColor { input: String, context: String },

    /// A requested theme has no extractable colors
    #[error("theme {theme:?} has no colors to analyze")]
    EmptyPalette { theme: String },

    /// Theme file could not be read
    #[error("failed to read theme file {path}")]
    ThemeRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Theme file is not valid theme JSON
    #[error("failed to parse theme file {path}")]
    ThemeParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalysisError {
    /// Create an `InvalidFormat` error with context
    pub fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Promote a parse failure to `InvalidColor` for a named analysis input
    pub fn invalid_color(input: impl Into<String>, context: impl Into<String>) -> Self {
        Self::InvalidColor {
            input: input.into(),
            context: context.into(),
        }
    }
}
