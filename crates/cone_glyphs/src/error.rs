//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Errors are
//! only raised by the validating entry points; numeric degeneracies during generation are
//! substituted with safe defaults instead of being reported.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid vector field: {0}")]
    InvalidField(String),

    #[error("invalid glyph options: {0}")]
    InvalidOptions(String),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn display_prefixes_field_errors() {
        let err = Error::InvalidField("xs must be ascending".into());
        assert_eq!(err.to_string(), "invalid vector field: xs must be ascending");
    }
}
