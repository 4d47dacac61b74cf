//! Error types for extraction and event handling

use thiserror::Error;

/// Result type for content extraction
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised while turning document bytes into text.
///
/// These are expected outcomes for malformed or oversized documents. The
/// handler converts them into a failure envelope instead of failing the
/// invocation.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// PDF extraction error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Content too large
    #[error("Content too large: {size} characters exceeds max {max} characters")]
    ContentTooLarge { size: usize, max: usize },

    /// Deterministic failure requested by a sentinel key
    #[error("{0}")]
    Synthetic(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "pdf")]
impl From<lopdf::Error> for ExtractError {
    fn from(err: lopdf::Error) -> Self {
        ExtractError::Pdf(err.to_string())
    }
}

/// Errors raised by an [`ObjectStore`](crate::store::ObjectStore) backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested object does not exist
    #[error("Object not found: {container}/{key}")]
    NotFound { container: String, key: String },

    /// Backend request failed
    #[error("{operation} failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal errors for a single invocation.
///
/// Anything surfacing here is reported to the host platform as a failed
/// invocation and no `.extract` object is written.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Notification carried no records
    #[error("Notification contained no records")]
    EmptyEvent,

    /// Fetch or store failure
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Reading the fetched object body failed
    #[error("Failed to read object body: {0}")]
    Read(#[source] std::io::Error),

    /// Result envelope could not be encoded
    #[error("Failed to serialize extract: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_message_is_verbatim() {
        let err = ExtractError::Synthetic("Test Tika Exception".to_string());
        assert_eq!(err.to_string(), "Test Tika Exception");
    }

    #[test]
    fn test_store_error_converts_into_handler_error() {
        let err: HandlerError = StoreError::NotFound {
            container: "bucket".to_string(),
            key: "a.pdf".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Storage error: Object not found: bucket/a.pdf");
    }
}
