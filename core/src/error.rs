//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only failures that abort a generation run live here. Unresolvable or cyclic
//! references are not errors: they render as the opaque type and generation continues.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document text could not be parsed, or an object had the wrong shape for its shim.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// The document is structurally unusable (e.g. `paths` is not a map of maps).
    #[from(ignore)]
    #[display("Structural Error: {_0}")]
    Structure(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_structure_display() {
        let app_err = AppError::Structure("paths must be a map".into());
        assert_eq!(format!("{}", app_err), "Structural Error: paths must be a map");
    }
}
