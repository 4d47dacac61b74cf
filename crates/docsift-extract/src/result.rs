//! Extraction outcomes and the JSON extract envelope

use crate::metadata::{Metadata, CONTENT_LENGTH, CONTENT_TYPE, RESOURCE_NAME};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Content type reported when the extractor could not tell
pub const UNKNOWN_CONTENT_TYPE: &str = "content/unknown";

/// Content type reported by failure envelopes
pub const FAILURE_CONTENT_TYPE: &str = "unknown";

/// Text and metadata produced by a [`ContentExtractor`](crate::ContentExtractor)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// The extracted plain text
    pub text: String,

    /// Attributes detected while extracting
    pub metadata: Metadata,
}

impl Extraction {
    pub fn new(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// Render the `FilePath` of a source object
pub fn resource_uri(scheme: &str, container: &str, key: &str) -> String {
    format!("{}://{}/{}", scheme, container, key)
}

/// Outcome of processing one source object
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    /// Text was extracted
    Success {
        file_path: String,
        text: String,
        content_type: String,
        content_length: String,
        metadata: IndexMap<String, String>,
    },
    /// The extractor rejected the document
    Failure {
        file_path: String,
        error_message: String,
    },
}

impl ExtractionResult {
    /// Build a success result, defaulting missing type and length
    pub fn success(file_path: impl Into<String>, extraction: Extraction) -> Self {
        let content_type = non_empty(extraction.metadata.get(CONTENT_TYPE))
            .unwrap_or(UNKNOWN_CONTENT_TYPE)
            .to_string();
        let content_length = non_empty(extraction.metadata.get(CONTENT_LENGTH))
            .unwrap_or("0")
            .to_string();

        ExtractionResult::Success {
            file_path: file_path.into(),
            text: extraction.text,
            content_type,
            content_length,
            metadata: extraction.metadata.flatten(),
        }
    }

    /// Build a failure result from an extraction error message
    pub fn failure(file_path: impl Into<String>, error_message: impl Into<String>) -> Self {
        ExtractionResult::Failure {
            file_path: file_path.into(),
            error_message: error_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success { .. })
    }

    pub fn file_path(&self) -> &str {
        match self {
            ExtractionResult::Success { file_path, .. } => file_path,
            ExtractionResult::Failure { file_path, .. } => file_path,
        }
    }

    /// Flat wire representation shared by both variants
    pub fn envelope(&self) -> ExtractEnvelope {
        match self {
            ExtractionResult::Success {
                file_path,
                text,
                content_type,
                content_length,
                metadata,
            } => ExtractEnvelope {
                exception: None,
                file_path: file_path.clone(),
                text: text.clone(),
                content_type: content_type.clone(),
                content_length: content_length.clone(),
                metadata: metadata.clone(),
            },
            ExtractionResult::Failure {
                file_path,
                error_message,
            } => {
                let mut metadata = IndexMap::new();
                metadata.insert(RESOURCE_NAME.to_string(), file_path.clone());
                ExtractEnvelope {
                    exception: Some(error_message.clone()),
                    file_path: file_path.clone(),
                    text: String::new(),
                    content_type: FAILURE_CONTENT_TYPE.to_string(),
                    content_length: "0".to_string(),
                    metadata,
                }
            }
        }
    }

    /// Encode as the JSON stored in `.extract` objects
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.envelope())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// JSON object written to `.extract` objects.
///
/// The key set is identical for success and failure; `Exception` is `null`
/// on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractEnvelope {
    pub exception: Option<String>,
    pub file_path: String,
    pub text: String,
    pub content_type: String,
    pub content_length: String,
    pub metadata: IndexMap<String, String>,
}

impl ExtractEnvelope {
    /// Parse a stored extract
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn is_failure(&self) -> bool {
        self.exception.is_some()
    }
}
