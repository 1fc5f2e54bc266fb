#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! Airport relevance ranking for [Tern](../tern/index.html).
//!
//! Given a free-text query and an unordered batch of airport records from a
//! directory backend, [`AirportRelevanceRanker`] produces the deduplicated,
//! relevance-ordered slice that autocomplete and flight-search resolution
//! show to the user. Ranking is a pure function of its inputs and the two
//! bonus tables in [`tern_settings::RankingSettings`]; it keeps no state
//! between calls and is safe to share across server workers.

mod ranker;
mod record;

pub use ranker::AirportRelevanceRanker;
pub use record::AirportRecord;
