//! Auto-detecting extractor dispatching on content type

use crate::{
    config::ExtractorConfig,
    detect::{self, detect_content_type},
    error::Result,
    metadata::{Metadata, CONTENT_LENGTH, CONTENT_TYPE, PARSED_BY},
    text::{finish, PlainTextExtractor},
    ContentExtractor, Extraction,
};
use tracing::debug;

#[cfg(feature = "html")]
use crate::html::HtmlExtractor;
#[cfg(feature = "pdf")]
use crate::pdf::PdfExtractor;

/// Detects the source type and hands it to the matching parser.
///
/// Types without a text parser yield empty text with the detected
/// metadata rather than an error.
pub struct AutoDetectExtractor {
    config: ExtractorConfig,
    plain: PlainTextExtractor,
    #[cfg(feature = "pdf")]
    pdf: PdfExtractor,
    #[cfg(feature = "html")]
    html: HtmlExtractor,
}

impl Default for AutoDetectExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl AutoDetectExtractor {
    pub const NAME: &'static str = "AutoDetectExtractor";

    /// Create a new auto-detecting extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            plain: PlainTextExtractor::new(config.clone()),
            #[cfg(feature = "pdf")]
            pdf: PdfExtractor::new(config.clone()),
            #[cfg(feature = "html")]
            html: HtmlExtractor::new(config.clone()),
            config,
        }
    }

    fn parse(&self, content_type: &str, bytes: &[u8], metadata: &mut Metadata) -> Result<String> {
        match detect::essence(content_type).as_str() {
            #[cfg(feature = "pdf")]
            detect::PDF => self.pdf.parse(bytes, metadata),
            #[cfg(feature = "html")]
            detect::HTML | "application/xhtml+xml" => self.html.parse(bytes, metadata),
            essence if essence.starts_with("text/") => self.plain.parse(bytes, metadata),
            essence => {
                debug!(content_type = essence, "No text parser for content type");
                Ok(String::new())
            }
        }
    }
}

#[async_trait::async_trait]
impl ContentExtractor for AutoDetectExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<Extraction> {
        let content_type = detect_content_type(bytes);

        let mut metadata = Metadata::new();
        metadata.set(CONTENT_TYPE, content_type.clone());
        metadata.set(CONTENT_LENGTH, bytes.len().to_string());
        metadata.add(PARSED_BY, Self::NAME);

        let text = self.parse(&content_type, bytes, &mut metadata)?;
        Ok(Extraction::new(finish(text, &self.config)?, metadata))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
