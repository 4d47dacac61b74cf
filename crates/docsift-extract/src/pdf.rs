//! PDF document content extraction

use crate::{
    config::ExtractorConfig,
    detect,
    error::Result,
    metadata::{Metadata, CONTENT_LENGTH, CONTENT_TYPE, CREATOR, PAGE_COUNT, PARSED_BY, TITLE},
    text::finish,
    ContentExtractor, Extraction,
};
use lopdf::{Dictionary, Document};
use tracing::debug;

/// PDF document content extractor
pub struct PdfExtractor {
    config: ExtractorConfig,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl PdfExtractor {
    pub const NAME: &'static str = "PdfExtractor";

    /// Create a new PDF extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract page text from PDF bytes, recording document attributes
    pub fn parse(&self, bytes: &[u8], metadata: &mut Metadata) -> Result<String> {
        let doc = Document::load_mem(bytes)?;
        let pages = doc.get_pages();

        let mut text_parts: Vec<String> = Vec::new();
        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(page_text) => {
                    let page_text = page_text.trim();
                    if !page_text.is_empty() {
                        text_parts.push(page_text.to_string());
                    }
                }
                Err(e) => debug!(page = *page_num, error = %e, "Skipping unreadable page"),
            }
        }

        metadata.add(PARSED_BY, Self::NAME);
        metadata.set(PAGE_COUNT, pages.len().to_string());

        if let Some(info) = info_dictionary(&doc) {
            if let Some(title) = info_string(info, b"Title") {
                metadata.set(TITLE, title);
            }
            if let Some(author) = info_string(info, b"Author") {
                metadata.set(CREATOR, author);
            }
        }

        Ok(text_parts.join("\n\n"))
    }
}

#[async_trait::async_trait]
impl ContentExtractor for PdfExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<Extraction> {
        let mut metadata = Metadata::new();
        metadata.set(CONTENT_TYPE, detect::PDF);
        metadata.set(CONTENT_LENGTH, bytes.len().to_string());
        let text = self.parse(bytes, &mut metadata)?;
        Ok(Extraction::new(finish(text, &self.config)?, metadata))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let reference = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    doc.get_dictionary(reference).ok()
}

/// Decode a document information string (UTF-16BE with BOM or PDFDocEncoding)
fn info_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    let bytes = info.get(key).ok()?.as_str().ok()?;
    let value = match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).ok()?
        }
        _ => bytes.iter().map(|&b| b as char).collect(),
    };
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractError;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream, StringFormat};

    fn sample_pdf(title: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal("Hello PDF")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(title.as_bytes().to_vec(), StringFormat::Literal),
            "Author" => Object::String(b"Finance Team".to_vec(), StringFormat::Literal),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[tokio::test]
    async fn test_extract_pdf_metadata() {
        let bytes = sample_pdf("Q1 Report");
        let extraction = PdfExtractor::default().extract(&bytes).await.unwrap();

        assert_eq!(extraction.text, "Hello PDF");
        assert_eq!(extraction.metadata.get(CONTENT_TYPE), Some(detect::PDF));
        assert_eq!(extraction.metadata.get(PAGE_COUNT), Some("1"));
        assert_eq!(extraction.metadata.get(TITLE), Some("Q1 Report"));
        assert_eq!(extraction.metadata.get(CREATOR), Some("Finance Team"));
        assert_eq!(
            extraction.metadata.get(CONTENT_LENGTH),
            Some(bytes.len().to_string().as_str())
        );
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_error() {
        let err = PdfExtractor::default()
            .extract(b"%PDF-1.4\nthis is not a real document")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[test]
    fn test_utf16_info_string() {
        let mut info = Dictionary::new();
        info.set(
            "Title",
            Object::String(vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69], StringFormat::Hexadecimal),
        );
        assert_eq!(info_string(&info, b"Title"), Some("Hi".to_string()));
        assert_eq!(info_string(&info, b"Author"), None);
    }
}
