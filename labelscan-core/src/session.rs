//! Orchestration state machine for scan queries.
//!
//! The session owns all transient UI state: the current display state, the
//! language and country preferences, and the request sequence counter. State
//! is mutated only through the defined transitions here, and every query
//! mints a sequence token so a slow response from a superseded query can
//! never overwrite the state of a newer one.

use crate::catalog::CatalogClient;
use crate::config::ScanConfig;
use crate::ingredient_text::select_ingredient_text;
use crate::matcher::find_warnings;
use crate::query::Query;
use crate::ranking::rank_candidates;
use crate::types::{Candidate, Language};

/// A resolved product with its ingredient text and computed warnings.
///
/// Text and warnings always derive from the same product resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub code: String,
    pub name: String,
    pub ingredient_text: String,
    pub warnings: Vec<String>,
}

/// Display state of a scan session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Loading,
    Resolved(Resolution),
    /// A name search produced candidates; awaiting an explicit selection.
    AwaitingSelection(Vec<Candidate>),
    /// Product or ingredient text absent. Covers both the missing product
    /// and the product-without-ingredient-data case, which display the same.
    NotFound,
    /// Network or parse failure; the message is for the log, the display
    /// stays generic.
    Failed(String),
}

/// Outcome of one resolution run, applied to the session under a token guard.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Resolved(Resolution),
    Candidates(Vec<Candidate>),
    NotFound,
    Failed(String),
}

/// Token minted when a query starts. Only the outcome carrying the latest
/// token may mutate session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// The orchestration state machine driving both resolution paths.
pub struct ScanSession {
    catalog: CatalogClient,
    config: ScanConfig,
    language: Language,
    country: Option<String>,
    state: SessionState,
    seq: u64,
}

impl ScanSession {
    pub fn new(catalog: CatalogClient, config: ScanConfig) -> Self {
        Self {
            catalog,
            config,
            language: Language::default(),
            country: None,
            state: SessionState::Idle,
            seq: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Set the country-field preference. An inline "in <country>" hint on the
    /// query itself still overrides this.
    pub fn set_country(&mut self, country: Option<String>) {
        self.country = country;
    }

    /// Start a new query: transition to `Loading` and mint its token.
    pub fn begin(&mut self) -> RequestToken {
        self.seq += 1;
        self.state = SessionState::Loading;
        RequestToken(self.seq)
    }

    /// Apply a finished outcome. Returns false (and leaves state untouched)
    /// when a newer query has been issued since `token` was minted.
    pub fn apply(&mut self, token: RequestToken, outcome: QueryOutcome) -> bool {
        if token.0 != self.seq {
            tracing::debug!(token = token.0, latest = self.seq, "dropping stale outcome");
            return false;
        }

        self.state = match outcome {
            QueryOutcome::Resolved(resolution) => SessionState::Resolved(resolution),
            QueryOutcome::Candidates(candidates) => SessionState::AwaitingSelection(candidates),
            QueryOutcome::NotFound => SessionState::NotFound,
            QueryOutcome::Failed(message) => SessionState::Failed(message),
        };
        true
    }

    /// Submit a raw query and drive it to its outcome.
    ///
    /// Blank input is ignored, leaving the state unchanged.
    pub async fn submit(&mut self, raw: &str) -> &SessionState {
        if raw.trim().is_empty() {
            return &self.state;
        }

        let token = self.begin();
        let outcome = self.run_query(raw).await;
        self.apply(token, outcome);
        &self.state
    }

    /// Resolve a candidate picked from an `AwaitingSelection` list (0-based).
    ///
    /// Ignored unless the session is awaiting a selection and the index is
    /// valid; re-enters the machine on the barcode path.
    pub async fn select(&mut self, index: usize) -> &SessionState {
        let code = match &self.state {
            SessionState::AwaitingSelection(candidates) => {
                candidates.get(index).map(|c| c.code.clone())
            }
            _ => None,
        };

        let Some(code) = code else {
            tracing::debug!(index, "selection ignored: no such candidate");
            return &self.state;
        };

        let token = self.begin();
        let outcome = self.resolve_code(&code).await;
        self.apply(token, outcome);
        &self.state
    }

    async fn run_query(&self, raw: &str) -> QueryOutcome {
        match Query::classify(raw, self.country.as_deref()) {
            Query::Barcode(code) => self.resolve_code(&code).await,
            Query::Name { term, country_hint } => {
                self.search(&term, country_hint.as_deref()).await
            }
        }
    }

    async fn search(&self, term: &str, country_hint: Option<&str>) -> QueryOutcome {
        match self.catalog.search_by_name(term).await {
            Ok(candidates) if candidates.is_empty() => QueryOutcome::NotFound,
            Ok(candidates) => QueryOutcome::Candidates(rank_candidates(
                candidates,
                country_hint,
                self.config.display_limit,
            )),
            Err(e) => {
                tracing::warn!(term, error = %e, "name search failed");
                QueryOutcome::Failed(e.to_string())
            }
        }
    }

    async fn resolve_code(&self, code: &str) -> QueryOutcome {
        let product = match self.catalog.product_by_code(code).await {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(code, error = %e, "product lookup failed");
                return QueryOutcome::Failed(e.to_string());
            }
        };

        let Some(product) = product else {
            return QueryOutcome::NotFound;
        };

        match select_ingredient_text(&product, self.language) {
            Some(text) => {
                let warnings = find_warnings(text, &self.config.keywords)
                    .into_iter()
                    .map(str::to_string)
                    .collect();

                QueryOutcome::Resolved(Resolution {
                    code: product.code.clone(),
                    name: product.name.clone(),
                    ingredient_text: text.to_string(),
                    warnings,
                })
            }
            None => {
                tracing::debug!(code, "product has no ingredient text");
                QueryOutcome::NotFound
            }
        }
    }
}
