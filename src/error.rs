//! Gateway-level error types shared across the transport, throttle, cache, and query layers.

// self
use crate::{_prelude::*, model::Resource};

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical gateway error exposed by public APIs.
///
/// The variants form a closed set so callers branch on the kind instead of matching strings.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout); never retried.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Payload did not match the expected record shape; nothing was cached.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Session resolution found nothing usable.
	#[error(transparent)]
	EmptyResult(#[from] EmptyResultError),
	/// Persistence hand-off failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),

	/// Every attempt in the retry budget was answered with HTTP 429.
	#[error("OpenF1 kept throttling after {attempts} attempts (last status {last_status}).")]
	ThrottledExhausted {
		/// Number of attempts performed.
		attempts: u32,
		/// Status code of the final response.
		last_status: u16,
		/// Retry-After hint from the final response, if supplied.
		retry_after: Option<Duration>,
	},
}

/// Configuration and validation failures raised while building a gateway.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot carry path segments (e.g. `data:` URLs).
	#[error("Base URL `{url}` cannot be used as an API root.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Base URL uses a scheme other than HTTP(S).
	#[error("Base URL must use http or https, got `{scheme}`.")]
	UnsupportedScheme {
		/// Offending scheme.
		scheme: String,
	},
	/// The minimum request interval must be positive.
	#[error("Minimum request interval must be greater than zero.")]
	ZeroInterval,
	/// The retry budget must allow at least one attempt.
	#[error("Retry budget must allow at least one attempt.")]
	ZeroAttempts,
	/// The per-request timeout must be positive.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
	/// A bounded cache needs room for at least one entry.
	#[error("Cache capacity must be greater than zero.")]
	ZeroCacheCapacity,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling OpenF1.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The per-request timeout elapsed.
	#[error("Request to OpenF1 timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Request URL could not be assembled from the base URL.
	#[error("Request URL could not be built from `{base}`.")]
	Url {
		/// Base URL the gateway was configured with.
		base: String,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling OpenF1.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

/// Response body did not decode into the expected record list.
#[derive(Debug, ThisError)]
#[error("OpenF1 {resource} payload (HTTP {status}) is malformed at `{path}`.")]
pub struct DecodeError {
	/// Resource that was being decoded.
	pub resource: Resource,
	/// HTTP status that accompanied the body; non-2xx statuses are decoded as-is.
	pub status: u16,
	/// JSON path of the first mismatch.
	pub path: String,
	/// Structured parsing failure.
	#[source]
	pub source: serde_json::Error,
}
impl DecodeError {
	pub(crate) fn new(
		resource: Resource,
		status: u16,
		err: serde_path_to_error::Error<serde_json::Error>,
	) -> Self {
		let path = err.path().to_string();

		Self { resource, status, path, source: err.into_inner() }
	}
}

/// Session resolution produced nothing usable.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum EmptyResultError {
	/// The sessions endpoint returned an empty list.
	#[error("OpenF1 returned no sessions.")]
	NoSessions,
	/// No started session had any driver data.
	#[error("No recent session with driver data found ({probed} sessions probed).")]
	NoRecentSessionWithData {
		/// Number of started sessions whose driver list was probed.
		probed: usize,
	},
}
