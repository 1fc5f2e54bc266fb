//! Build a directory from configuration.

use crate::{AirportDirectory, BundledDirectory, NullDirectory, RemoteDirectory};
use anyhow::Result;
use tern_settings::{BundledConfig, DirectoryConfig, Settings};

/// Build the airport directory described by `settings.directory`.
///
/// A `remote` configuration without an API key does not fail: the original
/// integrations all degrade to canned data when credentials are absent, so
/// this logs a warning and serves the bundled dataset instead. That keeps
/// development environments working without secrets.
pub fn make_directory(settings: &Settings) -> Result<Box<dyn AirportDirectory>> {
    let directory: Box<dyn AirportDirectory> = match &settings.directory {
        DirectoryConfig::Bundled(config) => BundledDirectory::new_boxed(config)?,

        DirectoryConfig::Remote(config) if config.api_key.is_some() => {
            RemoteDirectory::new_boxed(config)?
        }

        DirectoryConfig::Remote(_) => {
            tracing::warn!(
                r#type = "directory.no-credentials",
                "no API key configured for the remote directory; serving the bundled dataset"
            );
            BundledDirectory::new_boxed(&BundledConfig::default())?
        }

        DirectoryConfig::Null => Box::new(NullDirectory),
    };

    tracing::info!(
        r#type = "directory.configured",
        directory = %directory.name(),
        "Airport directory ready"
    );
    Ok(directory)
}
