//! The airport record shared between the directory backends and the ranker.

use fake::{
    faker::address::en::{CityName, CountryCode, CountryName},
    Fake,
};
use serde::{Deserialize, Serialize};

/// One airport as reported by a directory backend.
///
/// Records are immutable for ranking purposes. Directories may return
/// duplicates (the same IATA code from overlapping data sources) and records
/// with an empty `city_name`; the ranker handles both.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AirportRecord {
    /// The 3-letter uppercase IATA code, such as "LHR". Always present and
    /// well-formed; directories reject records without one.
    pub iata_code: String,

    /// The 4-letter ICAO code, if the directory knows it. Not consulted by
    /// ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao_code: Option<String>,

    /// The full airport name, such as "Heathrow Airport".
    pub name: String,

    /// The city the airport serves. May be empty when the directory doesn't
    /// associate the airport with a city.
    #[serde(default)]
    pub city_name: String,

    /// ISO 3166-1 alpha-2 country code, such as "GB".
    pub country_code: String,

    /// The full country name, such as "United Kingdom".
    pub country_name: String,
}

impl<F> fake::Dummy<F> for AirportRecord {
    fn dummy_with_rng<R: rand::Rng + ?Sized>(_config: &F, rng: &mut R) -> Self {
        let city: String = CityName().fake_with_rng(rng);
        Self {
            iata_code: (0..3).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect(),
            icao_code: None,
            name: format!("{} Airport", city),
            city_name: city,
            country_code: CountryCode().fake_with_rng(rng),
            country_name: CountryName().fake_with_rng(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AirportRecord;
    use fake::{Fake, Faker};

    #[test]
    fn fake_records_have_wellformed_iata_codes() {
        for _ in 0..20 {
            let record: AirportRecord = Faker.fake();
            assert_eq!(record.iata_code.len(), 3);
            assert!(record.iata_code.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn missing_city_deserializes_as_empty() {
        let record: AirportRecord = serde_json::from_str(
            r#"{
                "iata_code": "XXX",
                "name": "Somewhere Field",
                "country_code": "US",
                "country_name": "United States"
            }"#,
        )
        .expect("should deserialize");
        assert_eq!(record.city_name, "");
        assert_eq!(record.icao_code, None);
    }
}
