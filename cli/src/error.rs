#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use tsgen_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure reported by the core library.
    #[display("{}", _0)]
    Core(AppError),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Exposes the wrapped IO or core error as the source.
impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Core(e) => Some(e),
            CliError::General(_) => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_core_error_is_source() {
        let err: CliError = AppError::Structure("paths must be a map".into()).into();
        assert_eq!(err.to_string(), "Structural Error: paths must be a map");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_general_has_no_source() {
        let err: CliError = String::from("boom").into();
        assert!(err.source().is_none());
    }
}
