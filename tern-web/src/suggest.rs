//! Web handlers for the airport search API.

use crate::{errors::HandlerError, suggesters::SuggestService};
use actix_web::{
    get,
    web::{self, Data, ServiceConfig},
    HttpMessage, HttpRequest, HttpResponse,
};
use anyhow::Result;
use cadence::{CountedExt, Histogrammed, StatsdClient};
use serde::{Deserialize, Serialize};
use tern_ranking::AirportRecord;
use tern_settings::Settings;
use tracing_actix_web::RequestId;

/// Configure the airport search routes.
pub fn configure(config: &mut ServiceConfig) {
    config.service(suggest).service(resolve);
}

/// Suggest airports in response to the typed text, for autocomplete.
#[get("suggest")]
#[tracing::instrument(skip(suggester, metrics_client, settings, request, query_parameters))]
async fn suggest(
    query_parameters: web::Query<SuggestQueryParameters>,
    suggester: Data<SuggestService>,
    metrics_client: Data<StatsdClient>,
    settings: Data<Settings>,
    request: HttpRequest,
) -> Result<HttpResponse, HandlerError> {
    safe_log_request(settings.log_full_request, &query_parameters);

    let limit = query_parameters
        .limit
        .unwrap_or_else(|| suggester.autocomplete_limit());
    let airports = suggester
        .suggest(&query_parameters.q, limit)
        .await
        .map_err(|error| {
            tracing::error!(%error, r#type = "web.suggest.error", "Error fetching airports");
            HandlerError::internal()
        })?;

    tracing::debug!(
        r#type = "web.suggest.provided-count",
        airport_count = airports.len(),
        "Providing airport suggestions"
    );
    metrics_client
        .histogram("request.airports-per", airports.len() as u64)
        .ok();
    metrics_client.incr("request.suggest").ok();

    Ok(HttpResponse::Ok().json(SuggestResponse {
        airports: airports.iter().map(AirportWrapper).collect(),
        request_id: request_id(&request)?,
    }))
}

/// Resolve the typed text to the single most relevant airport, for building
/// flight-search requests.
#[get("resolve")]
#[tracing::instrument(skip(suggester, metrics_client, settings, request, query_parameters))]
async fn resolve(
    query_parameters: web::Query<SuggestQueryParameters>,
    suggester: Data<SuggestService>,
    metrics_client: Data<StatsdClient>,
    settings: Data<Settings>,
    request: HttpRequest,
) -> Result<HttpResponse, HandlerError> {
    safe_log_request(settings.log_full_request, &query_parameters);

    let airports = suggester
        .suggest(&query_parameters.q, suggester.search_limit())
        .await
        .map_err(|error| {
            tracing::error!(%error, r#type = "web.resolve.error", "Error fetching airports");
            HandlerError::internal()
        })?;
    metrics_client.incr("request.resolve").ok();

    let best = airports.first().ok_or_else(HandlerError::no_match)?;
    Ok(HttpResponse::Ok().json(ResolveResponse {
        airport: AirportWrapper(best),
        request_id: request_id(&request)?,
    }))
}

/// Read the request id assigned by the tracing middleware.
fn request_id(request: &HttpRequest) -> Result<String, HandlerError> {
    let extensions = request.extensions();
    let request_id = extensions
        .get::<RequestId>()
        .ok_or_else(HandlerError::internal)?;
    Ok(request_id.to_string())
}

/// Query parameters shared by the suggest and resolve endpoints.
#[derive(Debug, Default, Deserialize)]
struct SuggestQueryParameters {
    /// The text typed by the user. Trimming and length rules are applied by
    /// the pipeline, not here.
    #[serde(default)]
    q: String,

    /// Optional override of the configured result limit.
    limit: Option<usize>,
}

/// The response of the suggest endpoint.
#[derive(Debug, Serialize)]
struct SuggestResponse<'a> {
    /// Ranked airports, most relevant first.
    airports: Vec<AirportWrapper<'a>>,
    /// The id assigned to this request.
    request_id: String,
}

/// The response of the resolve endpoint.
#[derive(Debug, Serialize)]
struct ResolveResponse<'a> {
    /// The most relevant airport.
    airport: AirportWrapper<'a>,
    /// The id assigned to this request.
    request_id: String,
}

/// Customizes the output format of [`AirportRecord`].
#[derive(Debug)]
struct AirportWrapper<'a>(&'a AirportRecord);

/// A mapper from the internal record schema to the API the booking frontend
/// expects.
impl<'a> Serialize for AirportWrapper<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[allow(clippy::missing_docs_in_private_items)]
        struct Generated<'a> {
            #[serde(rename = "iataCode")]
            iata_code: &'a str,
            name: &'a str,
            #[serde(rename = "cityName")]
            city_name: &'a str,
            #[serde(rename = "countryCode")]
            country_code: &'a str,
            #[serde(rename = "countryName")]
            country_name: &'a str,
        }

        let generated = Generated {
            iata_code: &self.0.iata_code,
            name: &self.0.name,
            city_name: &self.0.city_name,
            country_code: &self.0.country_code,
            country_name: &self.0.country_name,
        };

        generated.serialize(serializer)
    }
}

/// Log an airport search request, respecting the log_full_request setting and
/// formatting fields in a way that is helpful to our downstream log handlers.
fn safe_log_request(log_query: bool, query_params: &SuggestQueryParameters) {
    let query = if log_query {
        query_params.q.as_str()
    } else {
        ""
    };

    tracing::info!(
        r#type = "web.airports.request",
        sensitive = true,
        %query,
        limit = query_params.limit.map(|l| l.to_string()).as_deref(),
        // Also includes fields from the root span, including `request_id`
        // and `http.target` (which does not include the query string).
        "handling airport search request"
    );
}

#[cfg(test)]
mod tests {
    use crate::{logging::TernRootSpanBuilder, suggesters::SuggestService};
    use actix_web::{
        test,
        web::{self, Data},
        App,
    };
    use cadence::{SpyMetricSink, StatsdClient};
    use pretty_assertions::assert_eq;
    use tern_settings::Settings;
    use tracing_actix_web::TracingLogger;

    /// Spin up the airport routes against the bundled directory.
    macro_rules! test_app {
        ($settings:expr) => {{
            let settings = $settings;
            let suggester =
                Data::new(SuggestService::init(&settings).expect("Failed to set up suggester"));
            let metrics_client =
                Data::new(StatsdClient::from_sink("tern-test", SpyMetricSink::new().1));
            test::init_service(
                App::new()
                    .app_data(Data::new(settings))
                    .app_data(suggester)
                    .app_data(metrics_client)
                    .wrap(TracingLogger::<TernRootSpanBuilder>::new())
                    .service(web::scope("api/v1/airports").configure(super::configure)),
            )
            .await
        }};
    }

    #[actix_rt::test]
    async fn suggest_ranks_the_bundled_dataset() {
        let app = test_app!(Settings::load_for_tests(|_| ()));

        let request = test::TestRequest::get()
            .uri("/api/v1/airports/suggest?q=London")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["airports"][0]["iataCode"], "LHR");
        let codes: Vec<&str> = body["airports"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["iataCode"].as_str().unwrap())
            .collect();
        assert!(codes.contains(&"LGW"));
        assert!(!body["request_id"].as_str().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn suggest_respects_the_limit_parameter() {
        let app = test_app!(Settings::load_for_tests(|_| ()));

        let request = test::TestRequest::get()
            .uri("/api/v1/airports/suggest?q=London&limit=1")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["airports"].as_array().unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn short_queries_suggest_nothing() {
        let app = test_app!(Settings::load_for_tests(|_| ()));

        let request = test::TestRequest::get()
            .uri("/api/v1/airports/suggest?q=L")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["airports"].as_array().unwrap().len(), 0);
    }

    #[actix_rt::test]
    async fn resolve_returns_the_top_airport() {
        let app = test_app!(Settings::load_for_tests(|_| ()));

        let request = test::TestRequest::get()
            .uri("/api/v1/airports/resolve?q=Paris")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["airport"]["iataCode"], "CDG");
        assert_eq!(body["airport"]["countryCode"], "FR");
    }

    #[actix_rt::test]
    async fn resolve_unmatched_query_is_not_found() {
        let app = test_app!(Settings::load_for_tests(|_| ()));

        let request = test::TestRequest::get()
            .uri("/api/v1/airports/resolve?q=zzzxyq123")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
