use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for TypeScript frontend operations.
pub type Result<T> = std::result::Result<T, TsError>;

/// Error variants for loading and parsing a TypeScript program.
#[derive(Debug, Error)]
pub enum TsError {
    /// Failed to read a source file.
    #[error("failed to read source '{path}': {error}")]
    Io {
        /// Path to the source file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The file extension is not one OXC can parse.
    #[error("unsupported source file '{path}'")]
    UnsupportedFile { path: PathBuf },

    /// Parsing the source file with OXC failed.
    #[error("failed to parse source '{path}': {message}")]
    Parse {
        /// Path to the source file.
        path: PathBuf,
        /// Aggregated parser error message.
        message: String,
    },

    /// Discovery options could not be deserialized.
    #[error("invalid discovery options: {0}")]
    InvalidOptions(String),
}

impl TsError {
    /// Helper to create a parse error from multiple diagnostic strings.
    pub fn parse_error(path: PathBuf, diagnostics: &[String]) -> Self {
        let message = diagnostics.join("; ");
        Self::Parse { path, message }
    }
}
