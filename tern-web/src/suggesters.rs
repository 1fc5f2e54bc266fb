//! The suggestion pipeline stored in Actix's app_data.

use anyhow::Result;
use tern_directory::{make_directory, AirportDirectory, DirectoryError};
use tern_ranking::{AirportRecord, AirportRelevanceRanker};
use tern_settings::Settings;

/// The directory-then-rank pipeline behind the airport endpoints.
///
/// One instance is built at startup and shared by every worker; both halves
/// are stateless per request.
pub struct SuggestService {
    /// The configured candidate source.
    directory: Box<dyn AirportDirectory>,

    /// The relevance ranker, carrying the bonus tables from settings.
    ranker: AirportRelevanceRanker,
}

impl SuggestService {
    /// Build the pipeline described by `settings`.
    pub fn init(settings: &Settings) -> Result<Self> {
        let _setup_span = tracing::info_span!("suggest_service_setup").entered();
        let directory = make_directory(settings)?;
        let ranker = AirportRelevanceRanker::new(settings.ranking.clone());
        Ok(Self { directory, ranker })
    }

    /// The configured result limit for autocomplete responses.
    pub fn autocomplete_limit(&self) -> usize {
        self.ranker.autocomplete_limit()
    }

    /// The configured candidate limit for resolution calls.
    pub fn search_limit(&self) -> usize {
        self.ranker.search_limit()
    }

    /// Fetch candidates for `query` and return the top `limit` by relevance.
    ///
    /// Queries whose trimmed length is under two characters skip the
    /// directory round-trip entirely and return nothing.
    pub async fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AirportRecord>, DirectoryError> {
        if query.trim().chars().count() < 2 {
            return Ok(Vec::new());
        }
        let candidates = self.directory.search(query).await?;
        Ok(self.ranker.rank(query, candidates, limit))
    }
}
