//! Plain text extraction and shared text post-processing

use crate::{
    config::ExtractorConfig,
    error::Result,
    metadata::{Metadata, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, PARSED_BY},
    ContentExtractor, ExtractError, Extraction,
};

/// Plain text extractor for UTF-8 sources
pub struct PlainTextExtractor {
    config: ExtractorConfig,
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl PlainTextExtractor {
    pub const NAME: &'static str = "PlainTextExtractor";

    /// Create a new plain text extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Decode `bytes` as UTF-8 and record the encoding
    pub fn parse(&self, bytes: &[u8], metadata: &mut Metadata) -> Result<String> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ExtractError::Parse(format!("Source is not valid UTF-8: {}", e)))?;
        metadata.add(PARSED_BY, Self::NAME);
        metadata.set(CONTENT_ENCODING, "UTF-8");
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
    }
}

#[async_trait::async_trait]
impl ContentExtractor for PlainTextExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<Extraction> {
        let mut metadata = Metadata::new();
        metadata.set(CONTENT_TYPE, "text/plain");
        metadata.set(CONTENT_LENGTH, bytes.len().to_string());
        let text = self.parse(bytes, &mut metadata)?;
        Ok(Extraction::new(finish(text, &self.config)?, metadata))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Apply cleaning and the length limit to freshly extracted text
pub(crate) fn finish(text: String, config: &ExtractorConfig) -> Result<String> {
    let text = if config.clean_text {
        clean_text(&text)
    } else {
        text
    };

    let size = text.chars().count();
    if size > config.max_length {
        return Err(ExtractError::ContentTooLarge {
            size,
            max: config.max_length,
        });
    }
    Ok(text)
}

/// Collapse whitespace runs, keeping at most one line break between blocks
pub(crate) fn clean_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_whitespace = false;
    let mut prev_was_newline = false;

    for c in text.chars() {
        if c == '\n' {
            if !prev_was_newline {
                result.push('\n');
                prev_was_newline = true;
            }
            prev_was_whitespace = true;
        } else if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
            prev_was_newline = false;
        }
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        let input = "  Hello   World  \n\n\n\n  Test  ";
        // Consecutive whitespace collapsed, preserving single newline
        assert_eq!(clean_text(input), "Hello World \nTest");
    }

    #[test]
    fn test_finish_enforces_max_length() {
        let config = ExtractorConfig::default().with_max_length(4);
        let err = finish("héllo".to_string(), &config).unwrap_err();
        assert!(matches!(err, ExtractError::ContentTooLarge { size: 5, max: 4 }));
    }

    #[test]
    fn test_finish_without_cleaning() {
        let config = ExtractorConfig::default().with_clean_text(false);
        assert_eq!(finish("a  b\n\n".to_string(), &config).unwrap(), "a  b\n\n");
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let extractor = PlainTextExtractor::default();
        let extraction = extractor.extract("\u{feff}naïve  notes".as_bytes()).await.unwrap();

        assert_eq!(extraction.text, "naïve notes");
        assert_eq!(extraction.metadata.get(CONTENT_ENCODING), Some("UTF-8"));
        assert_eq!(extraction.metadata.get(CONTENT_LENGTH), Some("16"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_parse_error() {
        let extractor = PlainTextExtractor::default();
        let err = extractor.extract(&[0x66, 0xff, 0x6f]).await.unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }
}
