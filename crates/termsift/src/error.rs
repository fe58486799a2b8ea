//! Error types for the termsift library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for termsift operations.
#[derive(Debug, Error)]
pub enum TermsiftError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report could not be turned into a dataset.
    #[error("Parse error at record {row}: {message}")]
    Parse { row: usize, message: String },

    /// The uploaded bytes are not valid UTF-8.
    #[error("Report is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Result type alias for termsift operations.
pub type Result<T> = std::result::Result<T, TermsiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TermsiftError::Parse {
            row: 1,
            message: "unterminated quote".to_string(),
        };
        assert_eq!(err.to_string(), "Parse error at record 1: unterminated quote");

        let utf8 = std::str::from_utf8(&[0xff]).unwrap_err();
        let err: TermsiftError = utf8.into();
        assert!(matches!(err, TermsiftError::Encoding(_)));
        assert!(err.to_string().starts_with("Report is not valid UTF-8"));
    }
}
