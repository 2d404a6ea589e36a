//! Error types for snapwatch

use thiserror::Error;

/// Errors that abort a status run.
///
/// Every variant is fatal: the run terminates without rendering the table
/// accumulated so far. The one non-fatal upstream condition (a GitHub API
/// `message` body) is logged where it is detected and never becomes an
/// error.
#[derive(Error, Debug)]
pub enum WatchError {
    /// HTTP transport failure against an upstream API
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response or config body did not decode as the expected JSON shape
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for WatchError {
    fn from(err: reqwest::Error) -> Self {
        WatchError::Http(err.to_string())
    }
}

/// Result type for snapwatch operations.
pub type Result<T> = std::result::Result<T, WatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_display() {
        let err: WatchError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("JSON decoding error"));
    }

    #[test]
    fn test_io_error_display() {
        let err: WatchError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();
        assert!(err.to_string().contains("IO error"));
        assert!(err.to_string().contains("no such file"));
    }
}
