//! Error types for locale loading and placeholder interpolation

use thiserror::Error;

/// Result type for locale operations
pub type Result<T> = std::result::Result<T, LocaleError>;

/// Errors raised while loading locales or translating messages
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to parse locale file {file}: {message}")]
    ParseError { file: String, message: String },

    #[error("Unknown placeholder function: {0}")]
    UnknownFunction(String),

    #[error("Placeholder recursion exceeded depth {limit} while resolving '{node}'")]
    RecursionLimit { node: String, limit: usize },

    #[error("Missing locale node: {0}")]
    MissingNode(String),

    #[error("Invalid locale configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for LocaleError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = LocaleError::UnknownFunction("shout".to_string());
        assert_eq!(error.to_string(), "Unknown placeholder function: shout");

        let error = LocaleError::RecursionLimit {
            node: "loop".to_string(),
            limit: 16,
        };
        assert_eq!(
            error.to_string(),
            "Placeholder recursion exceeded depth 16 while resolving 'loop'"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let locale_error = LocaleError::from(io_error);

        assert!(matches!(locale_error, LocaleError::IoError(_)));
        assert!(locale_error.to_string().contains("file not found"));
    }
}
