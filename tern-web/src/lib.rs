#![warn(missing_docs, clippy::missing_docs_in_private_items)]

//! Web server for [Tern](../tern/index.html)'s public API.

mod errors;
mod health;
mod logging;
mod suggest;
mod suggesters;

use crate::{logging::TernRootSpanBuilder, suggesters::SuggestService};
use actix_cors::Cors;
use actix_web::{
    dev::Server,
    get,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use anyhow::{Context, Result};
use cadence::StatsdClient;
use std::net::TcpListener;
use tern_settings::Settings;
use tracing_actix_web::TracingLogger;

/// Run the web server.
///
/// The returned server is a `Future` that must either be `.await`ed, or run
/// as a background task using `tokio::spawn`.
///
/// Most of the details from `settings` will be respected, except for those
/// that go into building the listener (the host and port). If you want to
/// respect the settings specified in that object, you must include them in
/// the construction of `listener`.
///
/// # Errors
///
/// Returns an error if the airport directory cannot be set up, or if the
/// server cannot be started on the provided listener.
///
/// # Examples
///
/// Run the server in the foreground. This will only return if there is an
/// error that causes the server to shut down. This is used to run Tern as a
/// service, such as in production.
///
/// ```no_run
/// # tokio_test::block_on(async {
/// let listener = std::net::TcpListener::bind("127.0.0.1:8080")
///     .expect("Failed to bind port");
/// let settings = tern_settings::Settings::load()
///     .expect("Failed to load settings");
/// let metrics = cadence::StatsdClient::from_sink("tern", cadence::NopMetricSink);
/// tern_web::run(listener, metrics, settings)
///     .expect("Failed to start server")
///     .await
///     .expect("Fatal error while running server");
/// # })
/// ```
pub fn run(
    listener: TcpListener,
    metrics_client: StatsdClient,
    settings: Settings,
) -> Result<Server> {
    let num_workers = settings.http.workers;

    let suggester =
        Data::new(SuggestService::init(&settings).context("Setting up the airport suggester")?);
    let metrics_client = Data::new(metrics_client);
    let settings = Data::new(settings);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(settings.clone())
            .app_data(suggester.clone())
            .app_data(metrics_client.clone())
            .wrap(TracingLogger::<TernRootSpanBuilder>::new())
            .wrap(Cors::permissive())
            // The core functionality of Tern
            .service(web::scope("api/v1/airports").configure(suggest::configure))
            .service(root_info)
            // Health and version endpoints for the load balancer and deploys.
            .service(web::scope("").configure(health::configure))
    })
    .listen(listener)?;

    if let Some(n) = num_workers {
        server = server.workers(n);
    }

    let server = server.run();
    Ok(server)
}

/// The root view, to provide information about what this service is.
///
/// This is intended to be seen by people trying to investigate what this
/// service is.
#[get("/")]
async fn root_info() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body("Tern is the airport search service of the travel booking platform.")
}
