//! Tuning knobs for the airport relevance ranker.
//!
//! The two bonus tables here are product policy, not derived data. They are
//! deliberately kept in configuration so they can be adjusted per environment
//! without touching the scoring code. The defaults below seed a service that
//! has no `ranking:` section in its config files.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Settings for the airport relevance ranker.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// How many ranked airports an autocomplete response may contain.
    pub autocomplete_limit: usize,

    /// How many ranked airports a search/resolution call may consider.
    pub search_limit: usize,

    /// Flat bonus applied when the query names a city that the
    /// `country_cities` table associates with the candidate's country. Large
    /// enough to dominate every textual rule combined.
    pub country_boost: u32,

    /// Extra relevance granted to major hub airports when their city is
    /// searched for directly, keyed by IATA code. Values range roughly from
    /// 350 for regional hubs to 1000 for the busiest airports.
    pub hub_bonuses: HashMap<String, u32>,

    /// For each ISO country code, the lowercase city names travellers
    /// reasonably mean when they type that name. Used to steer same-named
    /// cities in different countries toward the geographically intended one.
    pub country_cities: HashMap<String, HashSet<String>>,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            autocomplete_limit: 8,
            search_limit: 10,
            country_boost: 3000,
            hub_bonuses: default_hub_bonuses(),
            country_cities: default_country_cities(),
        }
    }
}

/// Seed table of major hub airports and their ranking boost.
fn default_hub_bonuses() -> HashMap<String, u32> {
    [
        ("LHR", 1000),
        ("ORD", 1000),
        ("ATL", 1000),
        ("CDG", 950),
        ("DXB", 950),
        ("HND", 950),
        ("LAX", 900),
        ("NRT", 900),
        ("FRA", 900),
        ("AMS", 880),
        ("SIN", 880),
        ("JFK", 850),
        ("ICN", 850),
        ("MAD", 800),
        ("BCN", 780),
        ("HKG", 780),
        ("MUC", 750),
        ("FCO", 720),
        ("IST", 700),
        ("SFO", 700),
        ("DFW", 650),
        ("YYZ", 600),
        ("SYD", 600),
        ("MIA", 550),
        ("ZRH", 500),
        ("VIE", 450),
        ("CPH", 400),
        ("LIS", 350),
    ]
    .iter()
    .map(|(code, bonus)| (code.to_string(), *bonus))
    .collect()
}

/// Seed table of the city names travellers commonly search for per country.
fn default_country_cities() -> HashMap<String, HashSet<String>> {
    let table: &[(&str, &[&str])] = &[
        (
            "GB",
            &["london", "manchester", "birmingham", "glasgow", "edinburgh"],
        ),
        ("ES", &["madrid", "barcelona", "valencia", "seville", "malaga"]),
        ("FR", &["paris", "lyon", "marseille", "nice"]),
        ("DE", &["berlin", "munich", "frankfurt", "hamburg"]),
        ("IT", &["rome", "milan", "venice", "naples"]),
        (
            "US",
            &[
                "new york",
                "los angeles",
                "chicago",
                "san francisco",
                "miami",
                "atlanta",
            ],
        ),
        ("JP", &["tokyo", "osaka"]),
        ("NL", &["amsterdam"]),
        ("PT", &["lisbon", "porto"]),
    ];

    table
        .iter()
        .map(|(country, cities)| {
            (
                country.to_string(),
                cities.iter().map(|c| c.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::RankingSettings;

    #[test]
    fn default_tables_are_seeded() {
        let settings = RankingSettings::default();
        assert_eq!(settings.autocomplete_limit, 8);
        assert_eq!(settings.search_limit, 10);
        assert_eq!(settings.hub_bonuses.get("LHR"), Some(&1000));
        assert!(settings
            .hub_bonuses
            .values()
            .all(|bonus| (350..=1000).contains(bonus)));
        assert!(settings.country_cities["GB"].contains("london"));
        assert!(settings.country_cities["ES"].contains("valencia"));
    }

    #[test]
    fn tables_deserialize_from_config_data() {
        let yaml = r#"
            country_boost: 500
            hub_bonuses:
              LHR: 1000
              LCY: 350
            country_cities:
              GB:
                - london
        "#;
        let settings: RankingSettings = serde_yaml::from_str(yaml).expect("should deserialize");
        assert_eq!(settings.country_boost, 500);
        assert_eq!(settings.hub_bonuses.get("LCY"), Some(&350));
        assert!(settings.country_cities["GB"].contains("london"));
        // Unspecified fields fall back to the defaults.
        assert_eq!(settings.autocomplete_limit, 8);
    }
}
