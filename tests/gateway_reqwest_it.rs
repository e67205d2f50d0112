// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
use url::Url;
// self
use openf1_gateway::{
	client::Gateway,
	config::GatewayConfig,
	error::{DecodeError, Error, TransportError},
	http::ReqwestHttpClient,
	model::Resource,
	query::{DriverQuery, RaceResultsQuery},
	reqwest::Client,
};

/// Builds a gateway whose reqwest client accepts the self-signed certificate `httpmock` serves.
fn gateway_for(base_url: &str) -> Gateway<ReqwestHttpClient> {
	let config = GatewayConfig::builder()
		.base_url(Url::parse(base_url).expect("Mock base URL should parse."))
		.min_interval(Duration::from_millis(1))
		.request_timeout(Duration::from_secs(5))
		.build()
		.expect("Gateway config should build.");
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.timeout(config.request_timeout)
		.build()
		.expect("Insecure reqwest client should build for tests.");

	Gateway::with_http_client(config, ReqwestHttpClient::with_client(client))
}

#[tokio::test]
async fn drivers_query_sends_filters_and_caches_the_response() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/drivers")
				.query_param("session_key", "9158")
				.query_param("team_name", "Red Bull Racing");
			then.status(200).header("content-type", "application/json").body(
				r#"[{
					"driver_number": 1,
					"session_key": 9158,
					"meeting_key": 1219,
					"broadcast_name": "M VERSTAPPEN",
					"full_name": "Max VERSTAPPEN",
					"name_acronym": "VER",
					"first_name": "Max",
					"last_name": "Verstappen",
					"country_code": "NED",
					"team_name": "Red Bull Racing",
					"team_colour": "3671C6",
					"headshot_url": null
				}]"#,
			);
		})
		.await;
	let gateway = gateway_for(&server.url("/v1"));
	let query = DriverQuery::new().session_key(9158).team_name("Red Bull Racing");
	let first = gateway.drivers(query.clone()).await.expect("First query should fetch.");
	let second = gateway.drivers(query).await.expect("Second query should hit the cache.");

	assert_eq!(first, second);
	assert_eq!(first[0].name_acronym, "VER");
	assert_eq!(gateway.stats.hits(), 1);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn persistent_throttling_exhausts_the_attempt_budget() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/race_results").query_param("race_id", "1141");
			then.status(429).header("retry-after", "1");
		})
		.await;
	let gateway = gateway_for(&server.url("/v1"));
	let err = gateway
		.race_results(RaceResultsQuery::new("1141"))
		.await
		.expect_err("Every attempt is throttled.");

	match err {
		Error::ThrottledExhausted { attempts, last_status, retry_after } => {
			assert_eq!(attempts, 3);
			assert_eq!(last_status, 429);
			assert_eq!(retry_after, Some(Duration::from_secs(1)));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn server_errors_surface_as_decode_failures_with_status() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/circuits");
			then.status(500).body("{\"detail\":\"internal error\"}");
		})
		.await;
	let gateway = gateway_for(&server.url("/v1"));
	let err = gateway.circuits(Default::default()).await.expect_err("A 500 body is not a list.");

	assert!(matches!(
		err,
		Error::Decode(DecodeError { resource: Resource::Circuits, status: 500, .. })
	));
	assert!(gateway.cache.is_empty());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
	let config = GatewayConfig::builder()
		.base_url(Url::parse("http://127.0.0.1:9/v1").expect("Fixture URL should parse."))
		.min_interval(Duration::from_millis(1))
		.build()
		.expect("Gateway config should build.");
	let gateway = Gateway::new(config).expect("Default reqwest gateway should build.");
	let err = gateway
		.race_results(RaceResultsQuery::new("1"))
		.await
		.expect_err("Nothing listens on the discard port.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
}
