//! Thread-safe in-memory [`ResponseCache`] with optional TTL and LRU capacity bound.

// std
use std::num::NonZeroUsize;
// crates.io
use lru::LruCache;
// self
use crate::{
	_prelude::*,
	cache::{CacheKey, CachedRecords, ResponseCache},
};

#[derive(Clone)]
struct Entry {
	records: CachedRecords,
	stored_at: Instant,
}

/// In-process response cache.
///
/// Hits are served under the shared read lock. Recency is bumped opportunistically: if the write
/// lock is free right after a hit the entry is promoted, otherwise the promotion is skipped so
/// readers never wait on each other. Entries older than the TTL are treated as misses and
/// dropped on the next lookup.
pub struct MemoryCache {
	entries: RwLock<LruCache<CacheKey, Entry>>,
	ttl: Option<Duration>,
}
impl MemoryCache {
	/// Cache that never evicts and never expires.
	pub fn unbounded() -> Self {
		Self { entries: RwLock::new(LruCache::unbounded()), ttl: None }
	}

	/// Cache holding at most `capacity` signatures, evicting the least recently used.
	pub fn with_capacity(capacity: NonZeroUsize) -> Self {
		Self { entries: RwLock::new(LruCache::new(capacity)), ttl: None }
	}

	/// Expires entries `ttl` after they were stored.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = Some(ttl);

		self
	}

	/// Configured time-to-live, if any.
	pub fn ttl(&self) -> Option<Duration> {
		self.ttl
	}

	fn is_fresh(&self, entry: &Entry, now: Instant) -> bool {
		match self.ttl {
			Some(ttl) => now.saturating_duration_since(entry.stored_at) < ttl,
			None => true,
		}
	}
}
impl Default for MemoryCache {
	fn default() -> Self {
		Self::unbounded()
	}
}
impl Debug for MemoryCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let entries = self.entries.read();

		f.debug_struct("MemoryCache")
			.field("len", &entries.len())
			.field("cap", &entries.cap())
			.field("ttl", &self.ttl)
			.finish()
	}
}
impl ResponseCache for MemoryCache {
	fn get(&self, key: &CacheKey) -> Option<CachedRecords> {
		let now = Instant::now();
		let hit = {
			let entries = self.entries.read();
			let entry = entries.peek(key)?;

			self.is_fresh(entry, now).then(|| entry.records.clone())
		};

		match hit {
			Some(records) => {
				if let Some(mut entries) = self.entries.try_write() {
					entries.promote(key);
				}

				Some(records)
			},
			None => {
				let mut entries = self.entries.write();

				// Another writer may have refreshed the entry in the meantime.
				if entries.peek(key).is_some_and(|entry| !self.is_fresh(entry, now)) {
					entries.pop(key);
				}

				None
			},
		}
	}

	fn insert(&self, key: CacheKey, records: CachedRecords) {
		self.entries.write().put(key, Entry { records, stored_at: Instant::now() });
	}

	fn invalidate(&self, key: &CacheKey) -> bool {
		self.entries.write().pop(key).is_some()
	}

	fn invalidate_where(&self, matches: &dyn Fn(&CacheKey) -> bool) -> usize {
		let mut entries = self.entries.write();
		let doomed = entries
			.iter()
			.filter(|(key, _)| matches(key))
			.map(|(key, _)| key.clone())
			.collect::<Vec<_>>();

		for key in &doomed {
			entries.pop(key);
		}

		doomed.len()
	}

	fn clear(&self) {
		self.entries.write().clear();
	}

	fn len(&self) -> usize {
		self.entries.read().len()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		cache::Signature,
		model::{ApiRecord, Resource, Team},
	};

	fn key(signature: &str) -> CacheKey {
		CacheKey::new(Resource::Teams, Signature::new(signature))
	}

	fn teams(name: &str) -> CachedRecords {
		Team::into_cached(vec![Team { id: 1, name: name.into() }])
	}

	#[test]
	fn unbounded_cache_keeps_every_signature() {
		let cache = MemoryCache::unbounded();

		for idx in 0..64 {
			cache.insert(key(&idx.to_string()), teams("Williams"));
		}

		assert_eq!(cache.len(), 64);
		assert!(cache.get(&key("0")).is_some());
	}

	#[test]
	fn bounded_cache_evicts_least_recently_used() {
		let cache = MemoryCache::with_capacity(
			NonZeroUsize::new(2).expect("Capacity fixture should be non-zero."),
		);

		cache.insert(key("a"), teams("Alpine"));
		cache.insert(key("b"), teams("Haas"));

		// Touch `a` so `b` becomes the eviction candidate.
		assert!(cache.get(&key("a")).is_some());

		cache.insert(key("c"), teams("Sauber"));

		assert!(cache.get(&key("a")).is_some());
		assert!(cache.get(&key("b")).is_none());
		assert!(cache.get(&key("c")).is_some());
	}

	#[test]
	fn invalidate_and_clear_drop_entries() {
		let cache = MemoryCache::default();

		cache.insert(key("a"), teams("Alpine"));
		cache.insert(key("b"), teams("Haas"));

		assert!(cache.invalidate(&key("a")));
		assert!(!cache.invalidate(&key("a")));
		assert_eq!(cache.len(), 1);

		cache.clear();

		assert!(cache.is_empty());
	}

	#[test]
	fn invalidate_where_drops_only_matching_keys() {
		let cache = MemoryCache::default();

		cache.insert(key("0-0-0-"), teams("Alpine"));
		cache.insert(key("2024-0-0-"), teams("Haas"));
		cache.insert(key("0-0-9158-"), teams("Sauber"));

		assert_eq!(cache.invalidate_where(&CacheKey::follows_current_session), 2);
		assert_eq!(cache.len(), 1);
		assert!(cache.get(&key("0-0-9158-")).is_some());
	}

	#[tokio::test(start_paused = true)]
	async fn entries_expire_after_ttl() {
		let cache = MemoryCache::unbounded().with_ttl(Duration::from_secs(60));

		cache.insert(key("a"), teams("Aston Martin"));
		tokio::time::advance(Duration::from_secs(59)).await;

		assert!(cache.get(&key("a")).is_some());

		tokio::time::advance(Duration::from_secs(1)).await;

		assert!(cache.get(&key("a")).is_none());
		assert!(cache.is_empty(), "Expired entries should be dropped on lookup.");
	}
}
