//! Text recognition abstraction for label photos.
//!
//! The OCR engine itself is an external collaborator; this module only
//! defines the seam. The real implementation shells out to tesseract, the
//! fake one serves canned text for tests.

mod fake;
mod tesseract;

pub use fake::FakeRecognizer;
pub use tesseract::TesseractRecognizer;

use async_trait::async_trait;

use crate::error::RecognizeError;
use crate::types::Language;

/// Trait for text recognizers.
///
/// Implementations should be stateless and thread-safe: take an image blob
/// and a language, return the recognized text.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in an image.
    async fn recognize(&self, image: &[u8], language: Language) -> Result<String, RecognizeError>;

    /// Get the engine name (e.g., "tesseract", "fake").
    fn engine_name(&self) -> &'static str;
}

/// Select a recognizer from the environment.
///
/// - `LABELSCAN_OCR`: "tesseract" (default) | "fake"
/// - `LABELSCAN_TESSERACT_BIN`: path to the tesseract binary
pub fn recognizer_from_env() -> Result<Box<dyn TextRecognizer>, RecognizeError> {
    let engine = std::env::var("LABELSCAN_OCR").unwrap_or_else(|_| "tesseract".to_string());

    match engine.as_str() {
        "tesseract" => {
            let recognizer = match std::env::var("LABELSCAN_TESSERACT_BIN") {
                Ok(binary) => TesseractRecognizer::with_binary(binary.into()),
                Err(_) => TesseractRecognizer::new(),
            };
            Ok(Box::new(recognizer))
        }
        "fake" => Ok(Box::new(FakeRecognizer::default())),
        other => Err(RecognizeError::NotConfigured(format!(
            "Unknown OCR engine: {}",
            other
        ))),
    }
}
