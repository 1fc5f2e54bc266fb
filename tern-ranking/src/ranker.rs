//! Scoring and ordering of airport candidates against a free-text query.

use crate::record::AirportRecord;
use std::collections::{hash_map::Entry, HashMap};
use tern_settings::RankingSettings;

/// Bonus for a query that is exactly a candidate's IATA code.
const EXACT_IATA: u32 = 100;
/// Bonus for a query that is exactly a candidate's city name.
const EXACT_CITY: u32 = 90;
/// Bonus for a city name starting with the query.
const CITY_PREFIX: u32 = 80;
/// Bonus for an IATA code containing the query.
const IATA_CONTAINS: u32 = 70;
/// Bonus for a city name containing the query.
const CITY_CONTAINS: u32 = 60;
/// Bonus for an airport name containing the query.
const NAME_CONTAINS: u32 = 40;
/// Bonus for a country name containing the query.
const COUNTRY_CONTAINS: u32 = 20;
/// Bonus for international airports, applied on top of any textual match.
const NAME_INTERNATIONAL: u32 = 200;

/// A candidate and its accumulated score, alive for one `rank` call.
struct ScoredCandidate {
    /// The underlying record.
    record: AirportRecord,
    /// Sum of all rule bonuses that fired for this record.
    score: u32,
}

/// Scores and orders airport candidates by relevance to a user-typed query.
///
/// Scoring is additive: every rule that fires contributes its bonus, so a
/// record can accumulate several bonuses at once. A major hub whose city is
/// typed exactly collects the exact-city bonus, its hub bonus, and the
/// prefix/substring bonuses together, which is what lets Heathrow outrank
/// London City for the query "London".
///
/// The ranker is a pure function of its inputs and the settings captured at
/// construction. It holds no mutable state, so one instance can serve any
/// number of concurrent requests.
#[derive(Clone)]
pub struct AirportRelevanceRanker {
    /// Limits and bonus tables, fixed at construction.
    settings: RankingSettings,
}

impl AirportRelevanceRanker {
    /// Create a ranker from the given tuning settings.
    pub fn new(settings: RankingSettings) -> Self {
        Self { settings }
    }

    /// The configured result limit for autocomplete responses.
    pub fn autocomplete_limit(&self) -> usize {
        self.settings.autocomplete_limit
    }

    /// The configured candidate limit for search and resolution calls.
    pub fn search_limit(&self) -> usize {
        self.settings.search_limit
    }

    /// Order `candidates` by relevance to `query`, highest first.
    ///
    /// Returns at most `limit` records, deduplicated by IATA code (keeping
    /// the highest-scoring instance of each). Records that match no rule are
    /// dropped rather than returned as weak matches. A trimmed query shorter
    /// than two characters yields an empty result; that is the caller-facing
    /// contract for degenerate input, not an error.
    ///
    /// Comparisons are case-insensitive but do not fold diacritics, so
    /// "Sao Paulo" will not match "São Paulo".
    pub fn rank(
        &self,
        query: &str,
        candidates: Vec<AirportRecord>,
        limit: usize,
    ) -> Vec<AirportRecord> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < 2 {
            return Vec::new();
        }
        let query_upper = query.to_uppercase();

        let mut by_iata: HashMap<String, ScoredCandidate> = HashMap::new();
        for record in candidates {
            let score = self.score(&query, &query_upper, &record);
            if score == 0 {
                continue;
            }
            match by_iata.entry(record.iata_code.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(ScoredCandidate { record, score });
                }
                Entry::Occupied(mut slot) => {
                    if score > slot.get().score {
                        slot.insert(ScoredCandidate { record, score });
                    }
                }
            }
        }

        let mut scored: Vec<ScoredCandidate> = by_iata.into_values().collect();
        // Equal scores carry no business meaning; order them by IATA code so
        // that output is deterministic.
        scored.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.record.iata_code.cmp(&b.record.iata_code))
        });
        scored.truncate(limit);

        tracing::trace!(%query, matched = scored.len(), "ranked airport candidates");
        scored.into_iter().map(|c| c.record).collect()
    }

    /// Compute the total score of one candidate.
    ///
    /// `query` is trimmed and lowercased; `query_upper` is its uppercase
    /// form for IATA comparisons.
    fn score(&self, query: &str, query_upper: &str, record: &AirportRecord) -> u32 {
        let city = record.city_name.to_lowercase();
        let name = record.name.to_lowercase();
        let country = record.country_name.to_lowercase();

        let mut score = 0;

        if record.iata_code == query_upper {
            score += EXACT_IATA;
        }
        if !city.is_empty() && city == query {
            score += EXACT_CITY;
            if let Some(bonus) = self.settings.hub_bonuses.get(&record.iata_code) {
                score += bonus;
            }
            // Steer same-named cities toward the country travellers usually
            // mean, e.g. Valencia in Spain over Valencia in Venezuela.
            if self
                .settings
                .country_cities
                .get(&record.country_code)
                .map_or(false, |cities| cities.contains(query))
            {
                score += self.settings.country_boost;
            }
        }
        if city.starts_with(query) {
            score += CITY_PREFIX;
        }
        if record.iata_code.contains(query_upper) {
            score += IATA_CONTAINS;
        }
        if city.contains(query) {
            score += CITY_CONTAINS;
        }
        if name.contains(query) {
            score += NAME_CONTAINS;
        }
        if country.contains(query) {
            score += COUNTRY_CONTAINS;
        }
        // International airports outrank their neighbours, but only among
        // records the query actually matched.
        if score > 0 && name.contains("international") {
            score += NAME_INTERNATIONAL;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::AirportRelevanceRanker;
    use crate::record::AirportRecord;
    use tern_settings::RankingSettings;

    fn record(iata: &str, name: &str, city: &str, cc: &str, country: &str) -> AirportRecord {
        AirportRecord {
            iata_code: iata.to_string(),
            icao_code: None,
            name: name.to_string(),
            city_name: city.to_string(),
            country_code: cc.to_string(),
            country_name: country.to_string(),
        }
    }

    fn ranker() -> AirportRelevanceRanker {
        AirportRelevanceRanker::new(RankingSettings::default())
    }

    fn world() -> Vec<AirportRecord> {
        vec![
            record("JFK", "John F. Kennedy International Airport", "New York", "US", "United States"),
            record("LAX", "Los Angeles International Airport", "Los Angeles", "US", "United States"),
            record("LHR", "Heathrow Airport", "London", "GB", "United Kingdom"),
            record("LGW", "Gatwick Airport", "London", "GB", "United Kingdom"),
            record("LCY", "London City Airport", "London", "GB", "United Kingdom"),
            record("CDG", "Charles de Gaulle Airport", "Paris", "FR", "France"),
            record("ORY", "Orly Airport", "Paris", "FR", "France"),
            record("VLC", "Valencia Airport", "Valencia", "ES", "Spain"),
            record("VLN", "Arturo Michelena International Airport", "Valencia", "VE", "Venezuela"),
            record("GRU", "São Paulo/Guarulhos International Airport", "São Paulo", "BR", "Brazil"),
        ]
    }

    fn iatas(records: &[AirportRecord]) -> Vec<&str> {
        records.iter().map(|r| r.iata_code.as_str()).collect()
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let ranker = ranker();
        let first = ranker.rank("lon", world(), 8);
        for _ in 0..10 {
            assert_eq!(ranker.rank("lon", world(), 8), first);
        }
    }

    #[test]
    fn zero_score_records_never_appear() {
        let results = ranker().rank("paris", world(), 10);
        assert_eq!(iatas(&results), vec!["CDG", "ORY"]);
    }

    #[test]
    fn limit_is_respected() {
        let results = ranker().rank("london", world(), 2);
        assert_eq!(results.len(), 2);
        assert!(ranker().rank("london", world(), 100).len() <= world().len());
    }

    #[test]
    fn duplicate_iata_codes_are_deduplicated() {
        // The same airport from two overlapping data sources, one of them
        // missing the city. The richer instance scores higher and is kept.
        let candidates = vec![
            record("LHR", "Heathrow Airport", "", "GB", "United Kingdom"),
            record("LHR", "Heathrow Airport", "London", "GB", "United Kingdom"),
            record("LHR", "Heathrow Airport", "", "GB", "United Kingdom"),
        ];
        let results = ranker().rank("london", candidates, 8);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].city_name, "London");
    }

    #[test]
    fn short_queries_return_nothing() {
        let ranker = ranker();
        assert!(ranker.rank("l", world(), 8).is_empty());
        assert!(ranker.rank("  l  ", world(), 8).is_empty());
        assert!(ranker.rank("", world(), 8).is_empty());
        assert!(ranker.rank("   ", world(), 8).is_empty());
    }

    #[test]
    fn exact_iata_outranks_city_sibling() {
        let results = ranker().rank("CDG", world(), 8);
        assert_eq!(results[0].iata_code, "CDG");
        assert!(!iatas(&results).contains(&"ORY"));
    }

    #[test]
    fn hub_bonus_orders_heathrow_above_city_airport() {
        let results = ranker().rank("London", world(), 8);
        let pos = |code: &str| iatas(&results).iter().position(|c| *c == code);
        assert!(pos("LHR").unwrap() < pos("LCY").unwrap());
    }

    #[test]
    fn country_table_disambiguates_same_named_cities() {
        let results = ranker().rank("Valencia", world(), 8);
        // VLN carries the international-name bonus, but the Spanish airport
        // still wins through the country boost.
        assert_eq!(results[0].iata_code, "VLC");
    }

    #[test]
    fn unmatched_queries_return_nothing() {
        assert!(ranker().rank("zzzxyq123", world(), 8).is_empty());
    }

    #[test]
    fn london_scenario_orders_heathrow_first() {
        let candidates = vec![
            record("JFK", "John F. Kennedy International Airport", "New York", "US", "United States"),
            record("LAX", "Los Angeles International Airport", "Los Angeles", "US", "United States"),
            record("LHR", "Heathrow Airport", "London", "GB", "United Kingdom"),
            record("LGW", "Gatwick Airport", "London", "GB", "United Kingdom"),
        ];
        let results = ranker().rank("London", candidates, 8);
        assert_eq!(iatas(&results), vec!["LHR", "LGW"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let ranker = ranker();
        assert_eq!(
            ranker.rank("LONDON", world(), 8),
            ranker.rank("london", world(), 8)
        );
        assert_eq!(ranker.rank("cdg", world(), 8)[0].iata_code, "CDG");
    }

    #[test]
    fn sao_paulo_does_not_match_without_diacritics() {
        // Comparison is case-insensitive but not diacritic-insensitive. This
        // pins the current behavior; loosening it is a product decision.
        let ranker = ranker();
        assert!(ranker.rank("Sao Paulo", world(), 8).is_empty());
        assert_eq!(ranker.rank("São Paulo", world(), 8)[0].iata_code, "GRU");
    }

    #[test]
    fn missing_city_still_matches_other_fields() {
        let candidates = vec![record(
            "ZRH",
            "Zurich Airport",
            "",
            "CH",
            "Switzerland",
        )];
        let results = ranker().rank("zurich", candidates, 8);
        assert_eq!(results[0].iata_code, "ZRH");
    }

    #[test]
    fn empty_candidate_list_returns_nothing() {
        assert!(ranker().rank("london", Vec::new(), 8).is_empty());
    }

    #[test]
    fn equal_scores_fall_back_to_iata_order() {
        // Two airports in towns the bonus tables know nothing about, with
        // identical names apart from the code. Every rule fires identically.
        let candidates = vec![
            record("BBB", "Smalltown Airport", "Smalltown", "XX", "Nowhere"),
            record("AAA", "Smalltown Airport", "Smalltown", "XX", "Nowhere"),
        ];
        let results = ranker().rank("smalltown", candidates, 8);
        assert_eq!(iatas(&results), vec!["AAA", "BBB"]);
    }

    #[test]
    fn additive_scoring_compounds_rule_bonuses() {
        // "los angeles" matches LAX by exact city, prefix, substring, name
        // substring, and the international-name bonus on top.
        let results = ranker().rank("los angeles", world(), 8);
        assert_eq!(results[0].iata_code, "LAX");

        // A name-only match like "gatwick" still surfaces the record even
        // though no city rule fires.
        let results = ranker().rank("gatwick", world(), 8);
        assert_eq!(iatas(&results), vec!["LGW"]);
    }
}
