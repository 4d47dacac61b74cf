//! Content type detection from magic bytes

pub const PDF: &str = "application/pdf";
pub const HTML: &str = "text/html";
pub const PLAIN_TEXT: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Detect the MIME type of a source.
///
/// Magic bytes win; sources without a signature are treated as text when
/// they are valid UTF-8 and as opaque binary otherwise.
pub fn detect_content_type(data: &[u8]) -> String {
    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }

    match std::str::from_utf8(data) {
        Ok(text) if looks_like_html(text) => HTML.to_string(),
        Ok(_) => PLAIN_TEXT.to_string(),
        Err(_) => OCTET_STREAM.to_string(),
    }
}

/// MIME type without parameters, lowercased
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn looks_like_html(text: &str) -> bool {
    let head: String = text
        .trim_start_matches('\u{feff}')
        .trim_start()
        .chars()
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf_magic() {
        assert_eq!(detect_content_type(b"%PDF-1.7\n%rest"), PDF);
    }

    #[test]
    fn test_detect_png_magic() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
        assert_eq!(detect_content_type(&png), "image/png");
    }

    #[test]
    fn test_detect_html() {
        assert_eq!(essence(&detect_content_type(b"  <!DOCTYPE html><html></html>")), HTML);
    }

    #[test]
    fn test_detect_text_and_binary() {
        assert_eq!(detect_content_type("plain words".as_bytes()), PLAIN_TEXT);
        assert_eq!(detect_content_type(&[0x00, 0xff, 0xfe, 0x01]), OCTET_STREAM);
    }

    #[test]
    fn test_essence() {
        assert_eq!(essence("Text/HTML; charset=utf-8"), "text/html");
    }
}
