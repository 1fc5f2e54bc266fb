//! Configuration for the airport directory backends.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use std::time::Duration;

/// Which airport directory to use as the source of ranking candidates.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectoryConfig {
    /// The airport dataset compiled into the binary.
    Bundled(BundledConfig),

    /// A third-party location API queried over HTTP.
    Remote(RemoteConfig),

    /// A directory that never returns any airports.
    Null,
}

/// Configuration for the bundled airport dataset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BundledConfig {
    /// Path to a JSON airport dataset to use instead of the compiled-in one.
    pub dataset_path: Option<String>,
}

/// Configuration for the remote location API.
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the location API, such as
    /// "https://api.example-flights.com/v1".
    pub base_url: String,

    /// API key for the location API. When absent, the service falls back to
    /// the bundled dataset instead of calling out.
    pub api_key: Option<String>,

    /// How long to wait for the location API before giving up.
    #[serde_as(as = "DurationSeconds")]
    #[serde(rename = "timeout_sec")]
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout: Duration::from_secs(5),
        }
    }
}
