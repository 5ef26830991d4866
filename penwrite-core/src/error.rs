//! Error types for font loading, layout, and plot configuration.

use std::fmt;
use std::io;

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Categories of errors produced by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The font or text source could not be read.
    Io,
    /// A malformed font record: bad header or stroke line, negative stroke
    /// count, out-of-range character code.
    Format,
    /// More glyph records than the character-code space can hold.
    Capacity,
    /// A configuration value outside its permitted range.
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::Format => write!(f, "format error"),
            Self::Capacity => write!(f, "capacity error"),
            Self::Validation => write!(f, "validation error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error produced while loading a font, laying out text, or validating
/// plot configuration.
#[derive(Debug, Clone)]
pub struct PlotError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// 1-based source line where the error was detected, if known.
    pub line: Option<usize>,
}

impl PlotError {
    /// Create a new error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
        }
    }

    /// Attach a source line number.
    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PlotError {}

impl From<io::Error> for PlotError {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorKind::Io, err.to_string())
    }
}

/// Convenience type alias for results using [`PlotError`].
pub type PlotResult<T> = Result<T, PlotError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_with_line() {
        let err = PlotError::new(ErrorKind::Format, "bad stroke line").with_line(7);
        let s = format!("{err}");
        assert!(s.contains("line 7"), "missing line number: {s}");
        assert!(s.contains("bad stroke line"), "missing message: {s}");
    }

    #[test]
    fn error_display_without_line() {
        let err = PlotError::new(ErrorKind::Capacity, "too many glyphs");
        let s = format!("{err}");
        assert!(!s.contains("line"), "should not have line number: {s}");
        assert!(s.contains("too many glyphs"), "missing message: {s}");
    }

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = PlotError::from(io_err);
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(err.message.contains("no such file"));
    }
}
