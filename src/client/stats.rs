// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for cache lookups.
#[derive(Debug, Default)]
pub struct GatewayStats {
	lookups: AtomicU64,
	hits: AtomicU64,
	fetches: AtomicU64,
}
impl GatewayStats {
	/// Total cache lookups (forced refreshes excluded).
	pub fn lookups(&self) -> u64 {
		self.lookups.load(Ordering::Relaxed)
	}

	/// Lookups answered from cache.
	pub fn hits(&self) -> u64 {
		self.hits.load(Ordering::Relaxed)
	}

	/// Requests handed to the throttle (one per fetch, regardless of retries).
	pub fn fetches(&self) -> u64 {
		self.fetches.load(Ordering::Relaxed)
	}

	pub(crate) fn record_lookup(&self, hit: bool) {
		self.lookups.fetch_add(1, Ordering::Relaxed);

		if hit {
			self.hits.fetch_add(1, Ordering::Relaxed);
		}
	}

	pub(crate) fn record_fetch(&self) {
		self.fetches.fetch_add(1, Ordering::Relaxed);
	}
}
