//! Object key decoding and suffix checks

use percent_encoding::percent_decode_str;

/// Decode a form-encoded object key from a storage notification.
///
/// `+` becomes a space first, then `%XX` escapes are decoded as UTF-8.
/// Malformed escapes are kept verbatim and invalid UTF-8 sequences are
/// replaced with U+FFFD.
pub fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Case-insensitive suffix test on a decoded key
pub fn has_suffix_ignore_case(key: &str, suffix: &str) -> bool {
    key.to_lowercase().ends_with(&suffix.to_lowercase())
}

/// Key of the extract object written for `key`
pub fn extract_key(key: &str, suffix: &str) -> String {
    format!("{}{}", key, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plus_as_space() {
        assert_eq!(decode_object_key("reports/Q1+report.pdf"), "reports/Q1 report.pdf");
    }

    #[test]
    fn test_decode_percent_escapes() {
        assert_eq!(decode_object_key("a%2Bb%20c.txt"), "a+b c.txt");
        assert_eq!(decode_object_key("caf%C3%A9.pdf"), "café.pdf");
    }

    #[test]
    fn test_encoded_plus_survives() {
        // `%2B` is decoded after `+` translation, so it stays a literal plus
        assert_eq!(decode_object_key("c%2B%2B+notes.txt"), "c++ notes.txt");
    }

    #[test]
    fn test_malformed_escape_kept() {
        assert_eq!(decode_object_key("100%+done%zz"), "100% done%zz");
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        assert_eq!(decode_object_key("bad%FF.txt"), "bad\u{FFFD}.txt");
    }

    #[test]
    fn test_plain_key_unchanged() {
        assert_eq!(decode_object_key("docs/plain.txt"), "docs/plain.txt");
    }

    #[test]
    fn test_suffix_ignore_case() {
        assert!(has_suffix_ignore_case("a.pdf.EXTRACT", ".extract"));
        assert!(has_suffix_ignore_case("x/Corrupt.Tika.Exception.Testing.PDF", "tika.exception.testing.pdf"));
        assert!(!has_suffix_ignore_case("a.extract.pdf", ".extract"));
    }

    #[test]
    fn test_extract_key() {
        assert_eq!(extract_key("reports/Q1 report.pdf", ".extract"), "reports/Q1 report.pdf.extract");
    }
}
