pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod ingredient_text;
pub mod matcher;
pub mod query;
pub mod ranking;
pub mod recognize;
pub mod session;
pub mod types;

pub use catalog::CatalogClient;
pub use config::ScanConfig;
pub use error::{FetchError, RecognizeError};
pub use http::{HttpClient, MockClient, MockResponse, RateLimitedClient, RateLimitedClientBuilder};
pub use ingredient_text::select_ingredient_text;
pub use matcher::find_warnings;
pub use query::Query;
pub use ranking::rank_candidates;
pub use recognize::{recognizer_from_env, FakeRecognizer, TesseractRecognizer, TextRecognizer};
pub use session::{QueryOutcome, RequestToken, Resolution, ScanSession, SessionState};
pub use types::{Candidate, IngredientTexts, Language, Product};
