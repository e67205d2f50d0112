//! Transport primitives for OpenF1 requests.
//!
//! [`ApiHttpClient`] is the gateway's only dependency on an HTTP stack. The gateway never looks
//! at status codes other than 429 itself; everything else travels to the decoder inside
//! [`ApiResponse`], alongside the [`ResponseMetadata`] needed to describe throttling failures.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::{config::GatewayConfig, error::ConfigError};

/// Boxed future returned by [`ApiHttpClient::get`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to issue a single GET against OpenF1.
///
/// Implementations must report every HTTP response (any status) as `Ok` and reserve `Err` for
/// failures where no response was received. They must not retry or pace requests themselves;
/// the gateway's throttle owns both concerns.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Performs a GET request against `url`.
	fn get<'a>(&'a self, url: &'a Url) -> HttpFuture<'a>;
}

/// Metadata captured from an HTTP response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl ResponseMetadata {
	/// Returns `true` for HTTP 429, the only throttling signal OpenF1 sends.
	pub fn is_throttled(&self) -> bool {
		self.status == 429
	}
}

/// Fully buffered HTTP response.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// Status and retry hints.
	pub meta: ResponseMetadata,
	/// Raw response body.
	pub body: Vec<u8>,
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// The caller is responsible for configuring a request timeout on the client.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with the config's per-request timeout and user agent.
	pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
		let mut headers = HeaderMap::new();

		headers.insert(
			USER_AGENT,
			config.user_agent.parse::<HeaderValue>().map_err(ConfigError::http_client_build)?,
		);

		let client = ReqwestClient::builder()
			.timeout(config.request_timeout)
			.default_headers(headers)
			.build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn get<'a>(&'a self, url: &'a Url) -> HttpFuture<'a> {
		Box::pin(async move {
			let response = self.0.get(url.clone()).send().await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { meta: ResponseMetadata { status, retry_after }, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::from_secs(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Duration::try_from(delta).ok();
		}
	}

	None
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	#[test]
	fn retry_after_accepts_delta_seconds() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("12"));

		assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(12)));
	}

	#[test]
	fn retry_after_ignores_past_dates_and_garbage() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));

		assert_eq!(parse_retry_after(&headers), None);

		headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));

		assert_eq!(parse_retry_after(&headers), None);
		assert_eq!(parse_retry_after(&HeaderMap::new()), None);
	}

	#[test]
	fn throttling_is_status_429_only() {
		assert!(ResponseMetadata { status: 429, retry_after: None }.is_throttled());
		assert!(!ResponseMetadata { status: 503, retry_after: None }.is_throttled());
	}
}
