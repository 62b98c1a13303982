//! Fake recognizer for testing.
//!
//! Returns deterministic text keyed on markers embedded in the image bytes,
//! allowing tests to run without an OCR engine installed.

use async_trait::async_trait;
use std::collections::HashMap;

use super::TextRecognizer;
use crate::error::RecognizeError;
use crate::types::Language;

/// A fake recognizer for testing.
///
/// Responses are matched by checking whether the image bytes, read as lossy
/// UTF-8, contain a registered marker. No match returns the default text, or
/// an error when none is set.
#[derive(Debug)]
pub struct FakeRecognizer {
    /// Map of image marker -> recognized text
    responses: HashMap<String, String>,
    /// Default text if no marker matches
    default_text: Option<String>,
}

impl Default for FakeRecognizer {
    fn default() -> Self {
        Self {
            responses: HashMap::new(),
            default_text: Some(String::new()),
        }
    }
}

impl FakeRecognizer {
    /// Create a new FakeRecognizer with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default_text: None,
        }
    }

    /// Create a FakeRecognizer that returns `text` for images containing a marker.
    pub fn with_text(marker: &str, text: &str) -> Self {
        let mut recognizer = Self::new();
        recognizer.add_text(marker, text);
        recognizer
    }

    /// Add recognized text for images containing a specific marker.
    pub fn add_text(&mut self, marker: &str, text: &str) {
        self.responses.insert(marker.to_string(), text.to_string());
    }

    /// Set the text returned when no marker matches.
    pub fn with_default_text(mut self, text: &str) -> Self {
        self.default_text = Some(text.to_string());
        self
    }
}

#[async_trait]
impl TextRecognizer for FakeRecognizer {
    async fn recognize(&self, image: &[u8], _language: Language) -> Result<String, RecognizeError> {
        let contents = String::from_utf8_lossy(image);

        for (marker, text) in &self.responses {
            if contents.contains(marker) {
                return Ok(text.clone());
            }
        }

        match &self.default_text {
            Some(text) => Ok(text.clone()),
            None => Err(RecognizeError::EngineFailed(
                "FakeRecognizer: no text registered for image".to_string(),
            )),
        }
    }

    fn engine_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_recognizer_matching() {
        let recognizer = FakeRecognizer::with_text("label-1", "Sugar, Palm Oil");
        let text = recognizer
            .recognize(b"label-1", Language::English)
            .await
            .unwrap();
        assert_eq!(text, "Sugar, Palm Oil");
    }

    #[tokio::test]
    async fn test_fake_recognizer_no_match() {
        let recognizer = FakeRecognizer::new();
        assert!(recognizer
            .recognize(b"unknown", Language::English)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_fake_recognizer_default_text() {
        let recognizer = FakeRecognizer::new().with_default_text("nothing here");
        let text = recognizer
            .recognize(b"unknown", Language::English)
            .await
            .unwrap();
        assert_eq!(text, "nothing here");
    }
}
