//! Extracted text value shared by the PDF and OCR paths.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

/// Text produced by one extraction.
///
/// Holds the string exactly as the underlying library returned it. No
/// layout, bounding boxes, or confidence scores are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedText {
    text: String,
}

impl ExtractedText {
    /// Wrap a string returned by an extraction backend.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Borrow the raw text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Take the raw text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Check if the raw text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the text holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Length of the raw text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// NFC-normalized text with every whitespace run collapsed to one space.
    ///
    /// Used to compare output against golden text without depending on the
    /// backend's line break placement.
    pub fn normalized(&self) -> String {
        let nfc: String = self.text.nfc().collect();
        nfc.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<String> for ExtractedText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for ExtractedText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_preserved() {
        let text = ExtractedText::new("Hello\n  world\x0c");
        assert_eq!(text.as_str(), "Hello\n  world\x0c");
        assert_eq!(text.to_string(), "Hello\n  world\x0c");
    }

    #[test]
    fn test_normalized_collapses_whitespace() {
        let text = ExtractedText::new("  Hello\n\n  World!\t\n");
        assert_eq!(text.normalized(), "Hello World!");
    }

    #[test]
    fn test_normalized_nfc() {
        // 'e' + combining acute accent
        let text = ExtractedText::new("Caf\u{0065}\u{0301}");
        assert_eq!(text.normalized(), "Caf\u{00e9}");
    }

    #[test]
    fn test_is_empty_matches_len() {
        let text = ExtractedText::new(" ");
        assert!(!text.is_empty());
        assert_eq!(text.len(), 1);

        let text = ExtractedText::default();
        assert!(text.is_empty());
        assert_eq!(text.len(), 0);
    }

    #[test]
    fn test_is_blank() {
        assert!(ExtractedText::new(" \n\x0c").is_blank());
        assert!(ExtractedText::new("").is_blank());
        assert!(!ExtractedText::new("a").is_blank());
    }
}
