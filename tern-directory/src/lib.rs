#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! Airport directory backends for [Tern](../tern/index.html).
//!
//! A directory answers a loose free-text query with an unordered batch of
//! [`AirportRecord`]s. Directories do not rank: they may return duplicates,
//! pre-filtered or entirely unfiltered data, and in whatever order their
//! source produced. Relevance ordering is the job of
//! [`tern_ranking::AirportRelevanceRanker`].

mod bundled;
mod maker;
mod remote;

pub use bundled::BundledDirectory;
pub use maker::make_directory;
pub use remote::RemoteDirectory;

use async_trait::async_trait;
use tern_ranking::AirportRecord;
use thiserror::Error;

/// A backend that can supply candidate airports for queries.
#[async_trait]
pub trait AirportDirectory: Send + Sync {
    /// An operator-visible name for this directory.
    fn name(&self) -> String;

    /// Fetch airports loosely matching `query`.
    ///
    /// The returned records are unordered and may contain duplicates. Every
    /// record is guaranteed to carry a well-formed IATA code; directories
    /// drop source entries without one.
    async fn search(&self, query: &str) -> Result<Vec<AirportRecord>, DirectoryError>;
}

/// A directory that never returns any airports.
///
/// Stands in where configuration needs a directory but none is available.
pub struct NullDirectory;

#[async_trait]
impl AirportDirectory for NullDirectory {
    fn name(&self) -> String {
        "NullDirectory".into()
    }

    async fn search(&self, _query: &str) -> Result<Vec<AirportRecord>, DirectoryError> {
        Ok(Vec::new())
    }
}

/// Errors that may occur while setting up a directory.
#[derive(Debug, Error)]
#[allow(missing_docs, clippy::missing_docs_in_private_items)]
pub enum SetupError {
    #[error("This directory cannot be used with the current Tern configuration")]
    InvalidConfiguration(#[source] anyhow::Error),

    #[error("There was a local I/O error while setting up this directory")]
    Io(#[source] anyhow::Error),

    #[error("Directory data was not in the expected format")]
    Format(#[source] anyhow::Error),
}

/// Errors that may occur while fetching airports.
#[derive(Debug, Error)]
#[allow(missing_docs, clippy::missing_docs_in_private_items)]
pub enum DirectoryError {
    #[error("There was a network error while fetching airports: {0}")]
    Network(#[source] anyhow::Error),

    #[error("The upstream response was not in the expected format: {0}")]
    Format(#[source] anyhow::Error),
}
