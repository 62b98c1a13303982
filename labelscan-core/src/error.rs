use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid JSON in response: {0}")]
    InvalidJson(String),
}

#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("Recognizer not configured: {0}")]
    NotConfigured(String),

    #[error("Recognition engine failed: {0}")]
    EngineFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
