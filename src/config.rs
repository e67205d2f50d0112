//! Gateway configuration and its validating builder.

// std
use std::num::NonZeroUsize;
// self
use crate::{_prelude::*, cache::MemoryCache, error::ConfigError, throttle::RetryPolicy};

/// Public OpenF1 API root.
pub const OPENF1_BASE_URL: &str = "https://api.openf1.org/v1";

/// Validated gateway settings.
///
/// Defaults mirror what OpenF1 tolerates from a single client: one request every five seconds,
/// three attempts on HTTP 429, and a ten second per-request timeout. Caches never expire and
/// are unbounded unless configured otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
	/// API root that resource paths are appended to.
	pub base_url: Url,
	/// Minimum spacing between consecutive outbound requests.
	pub min_interval: Duration,
	/// Attempts per request while throttled (including the first).
	pub max_attempts: u32,
	/// Per-request transport timeout.
	pub request_timeout: Duration,
	/// Time-to-live for cached responses.
	pub cache_ttl: Option<Duration>,
	/// Maximum cached signatures; least recently used are evicted first.
	pub cache_capacity: Option<NonZeroUsize>,
	/// Time-to-live for the memoized current session.
	pub session_ttl: Option<Duration>,
	/// `User-Agent` sent by the reqwest transport.
	pub user_agent: String,
}
impl GatewayConfig {
	/// Default minimum spacing between requests.
	pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(5);
	/// Default retry budget.
	pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
	/// Default per-request timeout.
	pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

	/// Returns a builder seeded with the defaults.
	pub fn builder() -> GatewayConfigBuilder {
		GatewayConfigBuilder::default()
	}

	/// Re-checks invariants; useful for configs that were deserialized instead of built.
	pub fn validate(&self) -> Result<(), ConfigError> {
		match self.base_url.scheme() {
			"http" | "https" => {},
			scheme => return Err(ConfigError::UnsupportedScheme { scheme: scheme.to_owned() }),
		}

		if self.base_url.cannot_be_a_base() {
			return Err(ConfigError::InvalidBaseUrl { url: self.base_url.to_string() });
		}
		if self.min_interval.is_zero() {
			return Err(ConfigError::ZeroInterval);
		}
		if self.max_attempts == 0 {
			return Err(ConfigError::ZeroAttempts);
		}
		if self.request_timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		Ok(())
	}

	/// Retry policy derived from the pacing settings.
	pub fn retry_policy(&self) -> RetryPolicy {
		RetryPolicy::new(self.min_interval, self.max_attempts)
	}

	/// Builds the default response cache for these settings.
	pub fn memory_cache(&self) -> MemoryCache {
		let cache = match self.cache_capacity {
			Some(capacity) => MemoryCache::with_capacity(capacity),
			None => MemoryCache::unbounded(),
		};

		match self.cache_ttl {
			Some(ttl) => cache.with_ttl(ttl),
			None => cache,
		}
	}
}
impl Default for GatewayConfig {
	fn default() -> Self {
		Self {
			base_url: default_base_url(),
			min_interval: Self::DEFAULT_MIN_INTERVAL,
			max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
			request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
			cache_ttl: None,
			cache_capacity: None,
			session_ttl: None,
			user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
		}
	}
}

/// Builder for [`GatewayConfig`] values.
#[derive(Debug, Default)]
pub struct GatewayConfigBuilder {
	config: GatewayConfig,
	cache_capacity: Option<usize>,
}
impl GatewayConfigBuilder {
	/// Overrides the API root (defaults to [`OPENF1_BASE_URL`]).
	pub fn base_url(mut self, url: Url) -> Self {
		self.config.base_url = url;

		self
	}

	/// Overrides the minimum spacing between requests.
	pub fn min_interval(mut self, interval: Duration) -> Self {
		self.config.min_interval = interval;

		self
	}

	/// Overrides the retry budget.
	pub fn max_attempts(mut self, attempts: u32) -> Self {
		self.config.max_attempts = attempts;

		self
	}

	/// Overrides the per-request timeout.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = timeout;

		self
	}

	/// Expires cached responses after `ttl`.
	pub fn cache_ttl(mut self, ttl: Duration) -> Self {
		self.config.cache_ttl = Some(ttl);

		self
	}

	/// Bounds the response cache to `capacity` signatures.
	pub fn cache_capacity(mut self, capacity: usize) -> Self {
		self.cache_capacity = Some(capacity);

		self
	}

	/// Expires the memoized current session after `ttl`.
	pub fn session_ttl(mut self, ttl: Duration) -> Self {
		self.config.session_ttl = Some(ttl);

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.config.user_agent = user_agent.into();

		self
	}

	/// Validates the accumulated settings.
	pub fn build(self) -> Result<GatewayConfig, ConfigError> {
		let Self { mut config, cache_capacity } = self;

		if let Some(capacity) = cache_capacity {
			config.cache_capacity =
				Some(NonZeroUsize::new(capacity).ok_or(ConfigError::ZeroCacheCapacity)?);
		}

		config.validate()?;

		Ok(config)
	}
}

fn default_base_url() -> Url {
	Url::parse(OPENF1_BASE_URL).expect("Built-in OpenF1 base URL must parse.")
}
