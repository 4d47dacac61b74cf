//! HTML document content extraction

use crate::{
    config::ExtractorConfig,
    detect,
    error::Result,
    metadata::{Metadata, CONTENT_LENGTH, CONTENT_TYPE, PARSED_BY, TITLE},
    text::finish,
    ContentExtractor, Extraction,
};
use scraper::{ElementRef, Html, Selector};

/// Elements whose content is never document text
const NON_TEXT_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Elements followed by a line break in the output
const BLOCK_TAGS: [&str; 27] = [
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "p", "pre",
    "section", "table", "tr",
];

/// HTML document content extractor.
///
/// Every text node under `<body>` is kept, in document order; only
/// scripts, styles and templates are dropped.
pub struct HtmlExtractor {
    config: ExtractorConfig,
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl HtmlExtractor {
    pub const NAME: &'static str = "HtmlExtractor";

    /// Create a new HTML extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract the body text from HTML bytes, recording the page title
    pub fn parse(&self, bytes: &[u8], metadata: &mut Metadata) -> Result<String> {
        let document = Html::parse_document(&String::from_utf8_lossy(bytes));

        metadata.add(PARSED_BY, Self::NAME);
        if let Some(title) = first_text(&document, "title") {
            metadata.set(TITLE, title);
        }

        let mut text = String::new();
        if let Ok(body) = Selector::parse("body") {
            for element in document.select(&body) {
                push_text(element, &mut text);
            }
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ContentExtractor for HtmlExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<Extraction> {
        let mut metadata = Metadata::new();
        metadata.set(CONTENT_TYPE, detect::HTML);
        metadata.set(CONTENT_LENGTH, bytes.len().to_string());
        let text = self.parse(bytes, &mut metadata)?;
        Ok(Extraction::new(finish(text, &self.config)?, metadata))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Trimmed text of the first element matching `selector`, if non-empty
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let text = element.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Append the text below `element` to `out` in document order
fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let tag = child.value().name();
            if NON_TEXT_TAGS.contains(&tag) {
                continue;
            }
            push_text(child, out);
            if BLOCK_TAGS.contains(&tag) {
                out.push('\n');
            }
        }
    }
}
