//! A directory backed by the airport dataset compiled into the binary.
//!
//! This is the directory used in development and tests, and the fallback
//! when no remote credentials are configured. The dataset covers the major
//! airports the booking frontend is demonstrated against; a different
//! dataset can be supplied through `dataset_path` without rebuilding.

use crate::{AirportDirectory, DirectoryError, SetupError};
use anyhow::Context;
use async_trait::async_trait;
use tern_ranking::AirportRecord;
use tern_settings::BundledConfig;

/// The airport dataset shipped with the binary.
const DEFAULT_DATASET: &str = include_str!("../data/airports.json");

/// A directory serving a fixed airport dataset from memory.
pub struct BundledDirectory {
    /// All airports in the dataset.
    records: Vec<AirportRecord>,
}

impl BundledDirectory {
    /// Create a boxed directory from settings, reading `dataset_path` if one
    /// is configured and the compiled-in dataset otherwise.
    pub fn new_boxed(config: &BundledConfig) -> Result<Box<Self>, SetupError> {
        let records = match &config.dataset_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading airport dataset from {}", path))
                    .map_err(SetupError::Io)?;
                parse_dataset(&raw)?
            }
            None => parse_dataset(DEFAULT_DATASET)?,
        };
        Ok(Box::new(Self { records }))
    }
}

/// Parse a JSON airport dataset, rejecting records without an IATA code.
fn parse_dataset(raw: &str) -> Result<Vec<AirportRecord>, SetupError> {
    let records: Vec<AirportRecord> = serde_json::from_str(raw)
        .context("parsing airport dataset")
        .map_err(SetupError::Format)?;
    let (records, dropped): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| r.iata_code.len() == 3 && r.iata_code.chars().all(|c| c.is_ascii_uppercase()));
    if !dropped.is_empty() {
        tracing::warn!(
            dropped = dropped.len(),
            "dropping dataset records without a well-formed IATA code"
        );
    }
    Ok(records)
}

#[async_trait]
impl AirportDirectory for BundledDirectory {
    fn name(&self) -> String {
        format!("BundledDirectory({} airports)", self.records.len())
    }

    async fn search(&self, query: &str) -> Result<Vec<AirportRecord>, DirectoryError> {
        let query = query.trim().to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| {
                r.iata_code.to_lowercase().contains(&query)
                    || r.name.to_lowercase().contains(&query)
                    || r.city_name.to_lowercase().contains(&query)
                    || r.country_name.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::BundledDirectory;
    use crate::AirportDirectory;
    use tern_settings::BundledConfig;

    #[tokio::test]
    async fn compiled_in_dataset_loads_and_filters_loosely() {
        let directory =
            BundledDirectory::new_boxed(&BundledConfig::default()).expect("should load dataset");

        let londons = directory.search("lond").await.expect("search failed");
        let codes: Vec<&str> = londons.iter().map(|r| r.iata_code.as_str()).collect();
        assert!(codes.contains(&"LHR"));
        assert!(codes.contains(&"LGW"));
        assert!(codes.contains(&"LCY"));
        assert!(!codes.contains(&"CDG"));
    }

    #[tokio::test]
    async fn search_matches_any_text_field() {
        let directory =
            BundledDirectory::new_boxed(&BundledConfig::default()).expect("should load dataset");

        // Matches by IATA code fragment.
        assert!(!directory.search("jfk").await.unwrap().is_empty());
        // Matches by country name.
        assert!(!directory.search("switzerland").await.unwrap().is_empty());
        // No match at all.
        assert!(directory.search("zzzxyq123").await.unwrap().is_empty());
    }

    #[test]
    fn missing_dataset_path_is_a_setup_error() {
        let config = BundledConfig {
            dataset_path: Some("/does/not/exist.json".to_string()),
        };
        assert!(BundledDirectory::new_boxed(&config).is_err());
    }
}
