//! Rate-limited, caching OpenF1 client.
//!
//! One gated request at a time, linear backoff on HTTP 429, and implicit current-session
//! resolution for queries that omit one.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod query;
pub mod store;
pub mod throttle;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and a scripted transport for tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// crates.io
	use parking_lot::Mutex;
	// self
	use crate::{
		client::Gateway,
		config::GatewayConfig,
		error::TransportError,
		http::{ApiHttpClient, ApiResponse, HttpFuture, ResponseMetadata},
	};

	/// Gateway type alias used by scripted tests.
	pub type ScriptedGateway = Gateway<ScriptedHttpClient>;

	/// Canned outcome replayed by [`ScriptedHttpClient`].
	#[derive(Clone, Debug)]
	pub enum ScriptedReply {
		/// HTTP response with the given status and body.
		Respond {
			/// Status code to report.
			status: u16,
			/// Raw body bytes.
			body: String,
		},
		/// Simulated connection failure.
		Fail,
	}
	impl ScriptedReply {
		/// `200 OK` with the provided JSON body.
		pub fn ok(body: impl Into<String>) -> Self {
			Self::Respond { status: 200, body: body.into() }
		}

		/// `429 Too Many Requests` with an empty body.
		pub fn throttled() -> Self {
			Self::Respond { status: 429, body: String::new() }
		}
	}

	/// Request observed by [`ScriptedHttpClient`].
	#[derive(Clone, Debug)]
	pub struct ObservedRequest {
		/// Full request URL.
		pub url: Url,
		/// Monotonic instant the request was issued.
		pub at: Instant,
	}

	#[derive(Debug, Default)]
	struct Script {
		routes: HashMap<String, VecDeque<ScriptedReply>>,
		fallback: HashMap<String, ScriptedReply>,
		observed: Vec<ObservedRequest>,
	}

	/// In-process transport that replays canned replies keyed by `path?query`.
	///
	/// Queued replies are consumed first; once a route's queue is empty the route's fallback
	/// (if any) is returned on every call. Unknown routes fail with a transport error.
	#[derive(Clone, Debug, Default)]
	pub struct ScriptedHttpClient(Arc<Mutex<Script>>);
	impl ScriptedHttpClient {
		/// Queues a one-shot reply for `route`.
		pub fn push(&self, route: &str, reply: ScriptedReply) -> &Self {
			self.0.lock().routes.entry(route.to_owned()).or_default().push_back(reply);

			self
		}

		/// Sets the reply returned once `route` runs out of queued replies.
		pub fn always(&self, route: &str, reply: ScriptedReply) -> &Self {
			self.0.lock().fallback.insert(route.to_owned(), reply);

			self
		}

		/// Every request observed so far, in order.
		pub fn observed(&self) -> Vec<ObservedRequest> {
			self.0.lock().observed.clone()
		}

		/// Number of requests observed so far.
		pub fn calls(&self) -> usize {
			self.0.lock().observed.len()
		}

		/// Number of requests observed for `route`.
		pub fn calls_to(&self, route: &str) -> usize {
			self.0.lock().observed.iter().filter(|req| route_of(&req.url) == route).count()
		}
	}
	impl ApiHttpClient for ScriptedHttpClient {
		fn get<'a>(&'a self, url: &'a Url) -> HttpFuture<'a> {
			Box::pin(async move {
				let route = route_of(url);
				let reply = {
					let mut script = self.0.lock();

					script.observed.push(ObservedRequest { url: url.clone(), at: Instant::now() });

					match script.routes.get_mut(&route).and_then(VecDeque::pop_front) {
						Some(reply) => Some(reply),
						None => script.fallback.get(&route).cloned(),
					}
				};

				// Suspend once so concurrent callers interleave like they would on a socket.
				tokio::task::yield_now().await;

				match reply {
					Some(ScriptedReply::Respond { status, body }) => Ok(ApiResponse {
						meta: ResponseMetadata { status, retry_after: None },
						body: body.into_bytes(),
					}),
					Some(ScriptedReply::Fail) | None => Err(TransportError::network(
						std::io::Error::new(std::io::ErrorKind::ConnectionRefused, route),
					)),
				}
			})
		}
	}

	/// Strips the scheme/host so routes read like `/v1/drivers?session_key=1`.
	pub fn route_of(url: &Url) -> String {
		match url.query() {
			Some(query) => format!("{}?{query}", url.path()),
			None => url.path().to_owned(),
		}
	}

	/// Config pointing at a fake host with the production pacing (5 s interval, 3 attempts).
	pub fn scripted_config() -> GatewayConfig {
		GatewayConfig::builder()
			.base_url(
				Url::parse("https://openf1.test/v1").expect("Scripted base URL should parse."),
			)
			.build()
			.expect("Scripted gateway config should build.")
	}

	/// Builds a gateway over a fresh [`ScriptedHttpClient`], returning both handles.
	pub fn scripted_gateway(config: GatewayConfig) -> (ScriptedGateway, ScriptedHttpClient) {
		let http_client = ScriptedHttpClient::default();
		let gateway = Gateway::with_http_client(config, http_client.clone());

		(gateway, http_client)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use async_lock::{Mutex as AsyncMutex, Semaphore};
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use tokio::time::Instant;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
