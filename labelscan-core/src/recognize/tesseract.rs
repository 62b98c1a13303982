//! Tesseract-backed recognizer.
//!
//! Shells out to the `tesseract` binary rather than linking the engine; the
//! image blob is staged in a temp file and the recognized text read back
//! from stdout.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::process::Command;

use super::TextRecognizer;
use crate::error::RecognizeError;
use crate::types::Language;

/// Counter distinguishing temp files of concurrent recognitions.
static SCRATCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Recognizer delegating to an external tesseract installation.
pub struct TesseractRecognizer {
    binary: PathBuf,
}

impl TesseractRecognizer {
    /// Use `tesseract` from PATH.
    pub fn new() -> Self {
        Self::with_binary(PathBuf::from("tesseract"))
    }

    /// Use a specific tesseract binary.
    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    fn scratch_path() -> PathBuf {
        let seq = SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "labelscan-ocr-{}-{}.img",
            std::process::id(),
            seq
        ))
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &[u8], language: Language) -> Result<String, RecognizeError> {
        let scratch = Self::scratch_path();
        tokio::fs::write(&scratch, image).await?;

        tracing::debug!(path = %scratch.display(), language = language.tesseract_code(), "running tesseract");
        let output = Command::new(&self.binary)
            .arg(&scratch)
            .arg("stdout")
            .arg("-l")
            .arg(language.tesseract_code())
            .stdin(Stdio::null())
            .output()
            .await;

        // The scratch file is dead weight whether or not the engine ran.
        let _ = tokio::fs::remove_file(&scratch).await;

        let output = output.map_err(|e| {
            RecognizeError::NotConfigured(format!(
                "Failed to run {}: {}",
                self.binary.display(),
                e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognizeError::EngineFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn engine_name(&self) -> &'static str {
        "tesseract"
    }
}
