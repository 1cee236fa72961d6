#![forbid(unsafe_code)]

//! Demo error type.

use std::fmt;
use std::io;

/// Errors that end the demo with a non-zero exit status.
#[derive(Debug)]
pub enum DemoError {
    /// Terminal or stream I/O failed.
    Io(io::Error),
    /// Command-line arguments or the config file were invalid.
    Config(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_messages() {
        let err = DemoError::Config("unknown argument: --x".into());
        assert_eq!(err.to_string(), "configuration error: unknown argument: --x");

        let err = DemoError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.to_string(), "I/O error: pipe closed");
    }

    #[test]
    fn io_error_has_source() {
        let err = DemoError::from(io::Error::other("boom"));
        assert!(err.source().is_some());
        assert!(DemoError::Config(String::new()).source().is_none());
    }
}
