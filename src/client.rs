//! The OpenF1 gateway: typed queries over a shared throttle, response cache, and session slot.

pub mod fetch;
pub mod queries;
pub mod session;

mod stats;

pub use stats::GatewayStats;

// self
use crate::{
	_prelude::*,
	cache::{ResponseCache, SessionSlot},
	config::GatewayConfig,
	http::ApiHttpClient,
	store::RecordSink,
	throttle::Throttle,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway = Gateway<ReqwestHttpClient>;

/// Rate-limited, caching client for the OpenF1 API.
///
/// The gateway owns the HTTP client, the [`Throttle`] that serializes and paces every outbound
/// request, the injected [`ResponseCache`], and the memoized current session. Clones share all
/// of that state, so one gateway per process (cloned into each request handler) keeps the
/// whole process within OpenF1's global limit.
pub struct Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client used for every outbound request.
	pub http_client: Arc<C>,
	/// Settings the gateway was built with.
	pub config: GatewayConfig,
	/// Response cache consulted before every fetch.
	pub cache: Arc<dyn ResponseCache>,
	/// Optional persistence hand-off for freshly fetched records.
	pub sink: Option<Arc<dyn RecordSink>>,
	/// Shared lookup counters.
	pub stats: Arc<GatewayStats>,
	throttle: Arc<Throttle>,
	session: Arc<SessionSlot>,
	session_guard: Arc<AsyncMutex<()>>,
}
impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a gateway over the caller-provided transport.
	///
	/// The config is trusted as-is; configs produced by [`GatewayConfig::builder`] are already
	/// validated, deserialized ones should go through [`GatewayConfig::validate`] first.
	pub fn with_http_client(config: GatewayConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			cache: Arc::new(config.memory_cache()),
			sink: None,
			stats: Default::default(),
			throttle: Arc::new(Throttle::new(config.retry_policy())),
			session: Arc::new(SessionSlot::new(config.session_ttl)),
			session_guard: Default::default(),
			config,
		}
	}

	/// Replaces the response cache.
	pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
		self.cache = cache;

		self
	}

	/// Hands every freshly fetched batch to `sink`.
	pub fn with_sink(mut self, sink: Arc<dyn RecordSink>) -> Self {
		self.sink = Some(sink);

		self
	}

	/// Throttle shared by every request this gateway issues.
	pub fn throttle(&self) -> &Throttle {
		&self.throttle
	}
}
#[cfg(feature = "reqwest")]
impl Gateway<ReqwestHttpClient> {
	/// Creates a gateway with its own reqwest transport built from `config`.
	pub fn new(config: GatewayConfig) -> Result<Self> {
		config.validate()?;

		let http_client = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_http_client(config, http_client))
	}

	/// Creates a gateway against the public OpenF1 API with default pacing.
	pub fn openf1() -> Result<Self> {
		Self::new(GatewayConfig::default())
	}
}
impl<C> Clone for Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			config: self.config.clone(),
			cache: self.cache.clone(),
			sink: self.sink.clone(),
			stats: self.stats.clone(),
			throttle: self.throttle.clone(),
			session: self.session.clone(),
			session_guard: self.session_guard.clone(),
		}
	}
}
impl<C> Debug for Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("base_url", &self.config.base_url.as_str())
			.field("throttle", &self.throttle)
			.field("cached_entries", &self.cache.len())
			.field("sink_set", &self.sink.is_some())
			.finish()
	}
}
