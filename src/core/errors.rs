//! Custom error types for translation operations

use thiserror::Error;

/// Fixed message returned to callers when the translation service rejects a document
pub const TRANSLATION_FAILED_MESSAGE: &str = "Translation failed.";

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Caller supplied no usable file reference
    #[error("{message}")]
    InvalidInput {
        message: String,
    },

    /// Source file could not be retrieved from its download link
    #[error("Failed to download file: {message}")]
    DownloadFailed {
        message: String,
    },

    /// Translation service answered with a non-2xx status
    #[error("Translation failed with status {status}: {details}")]
    UpstreamTranslationFailed {
        status: u16,
        details: String,
    },

    /// Declared media type cannot be used for the outbound document
    #[error("Invalid file format: {format}")]
    InvalidFormat {
        format: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl TranslationError {
    /// Shorthand for an [`TranslationError::InvalidInput`] with the given message
    pub fn invalid_input(message: impl Into<String>) -> Self {
        TranslationError::InvalidInput {
            message: message.into(),
        }
    }

    /// Report any failure as [`TranslationError::DownloadFailed`], keeping an existing cause as is
    pub fn into_download_failure(self) -> Self {
        match self {
            TranslationError::DownloadFailed { .. } => self,
            other => TranslationError::DownloadFailed {
                message: other.to_string(),
            },
        }
    }

    /// Whether the failure was caused by the caller rather than by this service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TranslationError::InvalidInput { .. }
                | TranslationError::DownloadFailed { .. }
                | TranslationError::InvalidFormat { .. }
        )
    }
}

impl From<config::ConfigError> for TranslationError {
    fn from(err: config::ConfigError) -> Self {
        TranslationError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_failed_message_includes_cause() {
        let err = TranslationError::DownloadFailed {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to download file: connection refused");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_download_failure_is_not_wrapped_twice() {
        let err = TranslationError::DownloadFailed {
            message: "HTTP status client error (404 Not Found)".to_string(),
        }
        .into_download_failure();
        assert_eq!(
            err.to_string(),
            "Failed to download file: HTTP status client error (404 Not Found)"
        );

        let err = TranslationError::NetworkError {
            message: "reset".to_string(),
        }
        .into_download_failure();
        assert!(matches!(err, TranslationError::DownloadFailed { .. }));
    }

    #[test]
    fn test_upstream_failure_is_not_client_error() {
        let err = TranslationError::UpstreamTranslationFailed {
            status: 429,
            details: "rate limited".to_string(),
        };
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("429"));
    }
}
