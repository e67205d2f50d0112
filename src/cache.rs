//! Response cache contracts, query signatures, and the built-in in-memory caches.
//!
//! Caches are injected into the gateway as `Arc<dyn ResponseCache>`, so callers (and tests) can
//! control staleness, bound memory, or swap in their own backend. The default [`MemoryCache`]
//! keeps every signature for the lifetime of the process unless a TTL or capacity is configured.

pub mod memory;
pub mod session;

pub use memory::MemoryCache;
pub use session::SessionSlot;

// self
use crate::{
	_prelude::*,
	model::{Circuit, Driver, Race, RaceResult, Resource, Session, Team},
};

/// Response cache contract implemented by gateway cache backends.
///
/// Reads must not block each other; a write may exclude readers for the duration of the insert.
pub trait ResponseCache
where
	Self: Send + Sync,
{
	/// Returns a fresh entry for `key`, if present.
	fn get(&self, key: &CacheKey) -> Option<CachedRecords>;

	/// Stores or replaces the entry for `key`.
	fn insert(&self, key: CacheKey, records: CachedRecords);

	/// Drops the entry for `key`, returning `true` if one existed.
	fn invalidate(&self, key: &CacheKey) -> bool;

	/// Drops every entry whose key satisfies `matches`, returning how many were dropped.
	fn invalidate_where(&self, matches: &dyn Fn(&CacheKey) -> bool) -> usize;

	/// Drops every entry.
	fn clear(&self);

	/// Number of stored entries, fresh or not.
	fn len(&self) -> usize;

	/// Returns `true` when no entries are stored.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Deterministic string derived from a query's optional filters.
///
/// Absent numeric filters serialize to `0` and absent strings to an empty string, so equal
/// filter sets always produce equal signatures.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Signature(String);
impl Signature {
	/// Wraps an already-deterministic key, e.g. a race identifier.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Builds the `season-meeting-session-team` signature used by filterable collections.
	pub fn from_filters(
		season: Option<i32>,
		meeting_key: Option<u32>,
		session_key: Option<u32>,
		team_name: Option<&str>,
	) -> Self {
		Self(format!(
			"{}-{}-{}-{}",
			season.unwrap_or(0),
			meeting_key.unwrap_or(0),
			session_key.unwrap_or(0),
			team_name.unwrap_or_default(),
		))
	}

	/// Borrows the signature text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for Signature {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Unique key identifying a cached response.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
	/// Collection the response came from.
	pub resource: Resource,
	/// Signature of the query filters.
	pub signature: Signature,
}
impl CacheKey {
	/// Builds a key for `resource` + `signature`.
	pub fn new(resource: Resource, signature: Signature) -> Self {
		Self { resource, signature }
	}

	/// Returns `true` for session-scoped collections cached without an explicit session.
	///
	/// Such entries hold records of whichever session was current when they were fetched, so
	/// they go stale as soon as the current session changes.
	pub fn follows_current_session(&self) -> bool {
		matches!(self.resource, Resource::Drivers | Resource::Teams | Resource::Races)
			&& self.signature.as_str().split('-').nth(2) == Some("0")
	}
}

/// Decoded record list stored by a [`ResponseCache`].
///
/// Lists are shared behind `Arc` so cache hits clone a pointer under the read lock and copy the
/// records only after releasing it.
#[derive(Clone, Debug)]
pub enum CachedRecords {
	/// Session list.
	Sessions(Arc<[Session]>),
	/// Driver list.
	Drivers(Arc<[Driver]>),
	/// Team list.
	Teams(Arc<[Team]>),
	/// Race list.
	Races(Arc<[Race]>),
	/// Circuit list.
	Circuits(Arc<[Circuit]>),
	/// Race result list.
	RaceResults(Arc<[RaceResult]>),
}
impl CachedRecords {
	/// Collection the payload belongs to.
	pub fn resource(&self) -> Resource {
		match self {
			CachedRecords::Sessions(_) => Resource::Sessions,
			CachedRecords::Drivers(_) => Resource::Drivers,
			CachedRecords::Teams(_) => Resource::Teams,
			CachedRecords::Races(_) => Resource::Races,
			CachedRecords::Circuits(_) => Resource::Circuits,
			CachedRecords::RaceResults(_) => Resource::RaceResults,
		}
	}

	/// Number of records in the payload.
	pub fn len(&self) -> usize {
		match self {
			CachedRecords::Sessions(records) => records.len(),
			CachedRecords::Drivers(records) => records.len(),
			CachedRecords::Teams(records) => records.len(),
			CachedRecords::Races(records) => records.len(),
			CachedRecords::Circuits(records) => records.len(),
			CachedRecords::RaceResults(records) => records.len(),
		}
	}

	/// Returns `true` when the payload holds no records.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn equal_filters_produce_equal_signatures() {
		let a = Signature::from_filters(Some(2024), None, Some(9158), Some("Ferrari"));
		let b = Signature::from_filters(Some(2024), None, Some(9158), Some("Ferrari"));

		assert_eq!(a, b);
		assert_eq!(a.as_str(), "2024-0-9158-Ferrari");
		assert_eq!(Signature::from_filters(None, None, None, None).as_str(), "0-0-0-");
	}

	#[test]
	fn any_differing_filter_changes_the_signature() {
		let base = Signature::from_filters(Some(2024), Some(1219), Some(9158), Some("Ferrari"));
		let variants = [
			Signature::from_filters(Some(2023), Some(1219), Some(9158), Some("Ferrari")),
			Signature::from_filters(Some(2024), Some(1220), Some(9158), Some("Ferrari")),
			Signature::from_filters(Some(2024), Some(1219), Some(9159), Some("Ferrari")),
			Signature::from_filters(Some(2024), Some(1219), Some(9158), Some("McLaren")),
			Signature::from_filters(None, Some(1219), Some(9158), Some("Ferrari")),
			Signature::from_filters(Some(2024), Some(1219), Some(9158), None),
		];

		for variant in variants {
			assert_ne!(base, variant, "Signature `{variant}` must differ from `{base}`.");
		}
	}

	#[test]
	fn cache_keys_partition_by_resource() {
		let signature = Signature::from_filters(None, None, Some(1), None);

		assert_ne!(
			CacheKey::new(Resource::Drivers, signature.clone()),
			CacheKey::new(Resource::Teams, signature),
		);
	}

	#[test]
	fn only_implicit_session_collections_follow_the_current_session() {
		let implicit = Signature::from_filters(Some(2024), None, None, Some("Red-Bull"));
		let pinned = Signature::from_filters(None, None, Some(9158), None);

		assert!(CacheKey::new(Resource::Drivers, implicit.clone()).follows_current_session());
		assert!(CacheKey::new(Resource::Teams, Signature::from_filters(None, None, None, None))
			.follows_current_session());
		assert!(!CacheKey::new(Resource::Drivers, pinned).follows_current_session());
		assert!(!CacheKey::new(Resource::Circuits, implicit).follows_current_session());
		assert!(!CacheKey::new(Resource::RaceResults, Signature::new("0")).follows_current_session());
	}
}
