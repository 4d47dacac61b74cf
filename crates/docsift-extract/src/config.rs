//! Extractor and handler configuration

use serde::{Deserialize, Serialize};

/// Suffix appended to source keys for extract objects
pub const EXTRACT_SUFFIX: &str = ".extract";

/// Key suffix that forces the failure envelope path
pub const FAILURE_SENTINEL: &str = "tika.exception.testing.pdf";

/// Message carried by the synthetic failure
pub const FAILURE_MESSAGE: &str = "Test Tika Exception";

/// Configuration for content extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum extracted text length (in characters)
    pub max_length: usize,

    /// Whether to collapse whitespace runs in extracted text
    pub clean_text: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_length: 10_000_000,
            clean_text: true,
        }
    }
}

impl ExtractorConfig {
    /// Create a new config with custom max length
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Enable or disable text cleaning
    pub fn with_clean_text(mut self, clean: bool) -> Self {
        self.clean_text = clean;
        self
    }
}

/// Where extract objects are written relative to the source container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DestinationPolicy {
    /// Write to `<prefix><source container>`
    Prefixed { prefix: String },
    /// Write next to the source object
    SameContainer,
}

impl Default for DestinationPolicy {
    fn default() -> Self {
        DestinationPolicy::Prefixed {
            prefix: "extracts.".to_string(),
        }
    }
}

impl DestinationPolicy {
    /// Resolve the destination container for a source container
    pub fn container_for(&self, source: &str) -> String {
        match self {
            DestinationPolicy::Prefixed { prefix } => format!("{}{}", prefix, source),
            DestinationPolicy::SameContainer => source.to_string(),
        }
    }
}

/// Configuration for [`ExtractionHandler`](crate::handler::ExtractionHandler)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Destination container policy
    pub destination: DestinationPolicy,

    /// Suffix marking extract objects; keys ending with it are ignored
    pub extract_suffix: String,

    /// Key suffix that triggers the synthetic extraction failure
    pub failure_sentinel: String,

    /// Message used for the synthetic extraction failure
    pub failure_message: String,

    /// Scheme used when rendering `FilePath` (`<scheme>://container/key`)
    pub uri_scheme: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            destination: DestinationPolicy::default(),
            extract_suffix: EXTRACT_SUFFIX.to_string(),
            failure_sentinel: FAILURE_SENTINEL.to_string(),
            failure_message: FAILURE_MESSAGE.to_string(),
            uri_scheme: "s3".to_string(),
        }
    }
}

impl HandlerConfig {
    /// Set the destination policy
    pub fn with_destination(mut self, destination: DestinationPolicy) -> Self {
        self.destination = destination;
        self
    }

    /// Set the URI scheme used in `FilePath`
    pub fn with_uri_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.uri_scheme = scheme.into();
        self
    }

    /// Set the synthetic failure sentinel and message
    pub fn with_failure_sentinel(
        mut self,
        sentinel: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.failure_sentinel = sentinel.into();
        self.failure_message = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_destination_is_prefixed() {
        let config = HandlerConfig::default();
        assert_eq!(config.destination.container_for("bucket"), "extracts.bucket");
    }

    #[test]
    fn test_same_container_policy() {
        let policy = DestinationPolicy::SameContainer;
        assert_eq!(policy.container_for("bucket"), "bucket");
    }

    #[test]
    fn test_destination_policy_serde() {
        let json = serde_json::to_string(&DestinationPolicy::SameContainer).unwrap();
        assert_eq!(json, r#"{"policy":"same_container"}"#);

        let parsed: DestinationPolicy =
            serde_json::from_str(r#"{"policy":"prefixed","prefix":"out-"}"#).unwrap();
        assert_eq!(parsed.container_for("docs"), "out-docs");
    }
}
