// Only overview documentation that is not relevant to one of the more specific
// crates should go here.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! A web API to power airport search for the travel booking platform.
//!
//! Tern is split into several subcrates that work in collaboration.
//!
//! - [tern-settings](../tern_settings/index.html)
//! - [tern-ranking](../tern_ranking/index.html)
//! - [tern-directory](../tern_directory/index.html)
//! - [tern-web](../tern_web/index.html)

use anyhow::{Context, Result};
use cadence::{BufferedUdpMetricSink, QueuingMetricSink, StatsdClient};
use std::net::{TcpListener, UdpSocket};
use tern_settings::{LogFormat, Settings};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Primary entry point
#[actix_rt::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("Loading settings")?;
    init_logging(&settings)?;
    let metrics_client = init_metrics(&settings).context("Initializing metrics")?;
    let listener = TcpListener::bind(settings.http.listen).context("Binding port")?;

    tern_web::run(listener, metrics_client, settings)
        .context("Starting tern-web server")?
        .await
        .context("Running tern-web server")?;

    Ok(())
}

/// Set up logging for Tern, based on settings and the `RUST_LOG` environment variable.
fn init_logging(settings: &Settings) -> Result<()> {
    LogTracer::init()?;
    let env_filter: EnvFilter = (&settings.logging.levels).into();

    match settings.logging.format {
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::fmt::Subscriber::builder()
                .pretty()
                .finish()
                .with(env_filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::fmt::Subscriber::builder()
                .json()
                .finish()
                .with(env_filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::fmt::Subscriber::builder()
                .compact()
                .finish()
                .with(env_filter);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

/// Set up a statsd client pointed at the configured sink.
fn init_metrics(settings: &Settings) -> Result<StatsdClient> {
    let socket = UdpSocket::bind("0.0.0.0:0").context("Binding metrics socket")?;
    socket
        .set_nonblocking(true)
        .context("Setting metrics socket to nonblocking")?;
    let host = (
        settings.metrics.sink_host.as_str(),
        settings.metrics.sink_port,
    );
    let sink = QueuingMetricSink::from(
        BufferedUdpMetricSink::from(host, socket).context("Building metrics sink")?,
    );
    Ok(StatsdClient::from_sink("tern", sink))
}
