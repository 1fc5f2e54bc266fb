//! A directory backed by a third-party location API.
//!
//! The flight SaaS exposes airport/city lookup as
//! `GET {base_url}/locations?subType=AIRPORT&keyword={query}`. This client
//! builds that request, calls the endpoint, and reshapes the response JSON
//! into [`AirportRecord`]s. It does not rank or dedupe.

use crate::{AirportDirectory, DirectoryError, SetupError};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;
use tern_ranking::AirportRecord;
use tern_settings::RemoteConfig;

/// A directory that queries the remote location API.
pub struct RemoteDirectory {
    /// HTTP client, configured with the request timeout from settings.
    client: reqwest::Client,

    /// Base URL of the location API, without a trailing slash.
    base_url: String,

    /// API key sent as a bearer token.
    api_key: String,
}

impl RemoteDirectory {
    /// Create a boxed directory from settings.
    ///
    /// Requires an API key; configurations without one should fall back to
    /// the bundled dataset instead (see [`crate::make_directory`]).
    pub fn new_boxed(config: &RemoteConfig) -> Result<Box<Self>, SetupError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| {
                SetupError::InvalidConfiguration(anyhow!(
                    "RemoteDirectory requires directory.api_key"
                ))
            })?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("building HTTP client")
            .map_err(SetupError::InvalidConfiguration)?;

        Ok(Box::new(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        }))
    }
}

#[async_trait]
impl AirportDirectory for RemoteDirectory {
    fn name(&self) -> String {
        format!("RemoteDirectory({})", self.base_url)
    }

    async fn search(&self, query: &str) -> Result<Vec<AirportRecord>, DirectoryError> {
        let response = self
            .client
            .get(format!("{}/locations", self.base_url))
            .query(&[("subType", "AIRPORT"), ("keyword", query)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("requesting locations")
            .map_err(DirectoryError::Network)?
            .error_for_status()
            .context("location API returned an error status")
            .map_err(DirectoryError::Network)?;

        let body: LocationsResponse = response
            .json()
            .await
            .context("decoding locations response")
            .map_err(DirectoryError::Format)?;

        let mut records = Vec::with_capacity(body.data.len());
        for location in body.data {
            match location.into_record() {
                Some(record) => records.push(record),
                None => {
                    tracing::warn!("dropping upstream location without an IATA code");
                }
            }
        }
        Ok(records)
    }
}

/// The envelope of the location API response.
#[derive(Debug, Deserialize)]
struct LocationsResponse {
    /// The matched locations.
    #[serde(default)]
    data: Vec<Location>,
}

/// One location entry in the upstream response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    /// The airport's IATA code. Entries without one are dropped.
    iata_code: Option<String>,
    /// The airport name.
    #[serde(default)]
    name: String,
    /// Nested address fields.
    #[serde(default)]
    address: LocationAddress,
}

/// The nested address block of a location entry.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationAddress {
    /// The city served by the airport.
    #[serde(default)]
    city_name: String,
    /// ISO country code.
    #[serde(default)]
    country_code: String,
    /// Full country name.
    #[serde(default)]
    country_name: String,
}

impl Location {
    /// Reshape an upstream entry into an [`AirportRecord`], or `None` if it
    /// has no IATA code.
    fn into_record(self) -> Option<AirportRecord> {
        let iata_code = self.iata_code.filter(|code| !code.is_empty())?;
        Some(AirportRecord {
            iata_code,
            icao_code: None,
            name: self.name,
            city_name: self.address.city_name,
            country_code: self.address.country_code,
            country_name: self.address.country_name,
        })
    }
}
