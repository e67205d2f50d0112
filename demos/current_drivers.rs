//! Demonstrates resolving the current session and listing its drivers through the default reqwest
//! transport, against a local mock of the OpenF1 API.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use openf1_gateway::{
	client::Gateway, config::GatewayConfig, http::ReqwestHttpClient, query::DriverQuery,
	reqwest::Client,
};

const SESSIONS: &str = r#"[
	{"session_key":9590,"meeting_key":1245,"session_name":"Race","country_name":"Italy","year":2024,
	 "date_start":"2024-09-01T13:00:00+00:00","date_end":"2024-09-01T15:00:00+00:00"},
	{"session_key":9999,"meeting_key":9999,"session_name":"Race","country_name":"Nowhere","year":2999,
	 "date_start":"2999-01-01T00:00:00+00:00","date_end":"2999-01-01T02:00:00+00:00"}
]"#;
const DRIVERS: &str = r#"[
	{"driver_number":16,"session_key":9590,"meeting_key":1245,"broadcast_name":"C LECLERC",
	 "full_name":"Charles LECLERC","name_acronym":"LEC","first_name":"Charles","last_name":"Leclerc",
	 "country_code":"MON","team_name":"Ferrari","team_colour":"E8002D","headshot_url":null},
	{"driver_number":81,"session_key":9590,"meeting_key":1245,"broadcast_name":"O PIASTRI",
	 "full_name":"Oscar PIASTRI","name_acronym":"PIA","first_name":"Oscar","last_name":"Piastri",
	 "country_code":"AUS","team_name":"McLaren","team_colour":"FF8000","headshot_url":null}
]"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let sessions_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/sessions");
			then.status(200).header("content-type", "application/json").body(SESSIONS);
		})
		.await;
	let drivers_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/drivers").query_param("session_key", "9590");
			then.status(200).header("content-type", "application/json").body(DRIVERS);
		})
		.await;
	let config = GatewayConfig::builder()
		.base_url(Url::parse(&server.url("/v1"))?)
		.min_interval(Duration::from_millis(100))
		.build()?;
	// httpmock serves a self-signed certificate.
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.timeout(config.request_timeout)
			.build()?,
	);
	let gateway = Gateway::with_http_client(config, http_client);
	let session = gateway.current_session().await?;

	println!(
		"Current session: {} {} ({}).",
		session.country_name, session.session_name, session.session_key
	);

	for driver in gateway.drivers(DriverQuery::new()).await? {
		println!(
			"#{:<3} {} ({}).",
			driver.driver_number,
			driver.full_name,
			driver.team_name.as_deref().unwrap_or("unknown team")
		);
	}

	// The second listing is served from cache.
	gateway.drivers(DriverQuery::new()).await?;

	sessions_mock.assert_calls_async(1).await;
	// One resolution probe plus one uncached listing.
	drivers_mock.assert_calls_async(2).await;

	Ok(())
}
