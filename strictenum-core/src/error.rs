//! Typed error handling for strictenum.
//!
//! Provides structured errors that hosts can match on, with full context
//! about which unit failed to load and where.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for strictenum operations.
///
/// Violations found by the checker are never errors; they are reported as
/// diagnostics. Errors here are load-time failures that abort a whole unit.
#[derive(Error, Debug)]
pub enum StrictEnumError {
    /// I/O error when reading source files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Syntax error in a Go source file
    #[error("Parse error in {path}: {message}")]
    Parse {
        path: PathBuf,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
        /// Column number (1-indexed) if available
        column: Option<usize>,
    },

    /// The Go grammar could not be loaded into the parser
    #[error("Language error: {message}")]
    Language { message: String },

    /// Checker settings payload could not be decoded
    #[error("Settings error: {message}")]
    Settings { message: String },

    /// A unit was requested with no files in it
    #[error("Empty unit: {message}")]
    EmptyUnit { message: String },

    /// No analyzer plugin registered under the requested name
    #[error("Unknown plugin: {name}")]
    UnknownPlugin { name: String },
}

impl StrictEnumError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a parse error without location.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Create a parse error with line/column info.
    pub fn parse_at(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Create a language setup error.
    pub fn language(message: impl Into<String>) -> Self {
        Self::Language {
            message: message.into(),
        }
    }

    /// Create a settings decoding error.
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    /// Check if analysis of other units can continue after this error.
    ///
    /// A unit that fails to load is skipped; a broken grammar or bad
    /// settings affect every unit.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Parse { .. } | Self::EmptyUnit { .. }
        )
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Parse { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for strictenum results.
pub type StrictEnumResult<T> = Result<T, StrictEnumError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> StrictEnumResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> StrictEnumResult<T> {
        self.map_err(|e| StrictEnumError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = StrictEnumError::io(
            PathBuf::from("/pkg/status.go"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, StrictEnumError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("/pkg/status.go")));
        assert!(err.to_string().contains("/pkg/status.go"));
    }

    #[test]
    fn test_parse_error_with_location() {
        let err = StrictEnumError::parse_at("/pkg/color.go", "syntax error", 10, 5);
        if let StrictEnumError::Parse { line, column, .. } = &err {
            assert_eq!(*line, Some(10));
            assert_eq!(*column, Some(5));
        } else {
            panic!("Expected Parse error");
        }
    }

    #[test]
    fn test_is_recoverable() {
        assert!(StrictEnumError::parse("/x.go", "error").is_recoverable());
        assert!(!StrictEnumError::language("abi mismatch").is_recoverable());
        assert!(!StrictEnumError::settings("not a map").is_recoverable());
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let converted = result.with_path("/missing/file.go");
        assert!(matches!(converted, Err(StrictEnumError::Io { .. })));
    }
}
