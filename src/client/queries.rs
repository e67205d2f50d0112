//! Typed query methods.
//!
//! Every method follows the same template: resolve the current session if the query omits one,
//! derive the cache key from the caller's filters, return a cached copy on hit, otherwise fetch
//! through the throttle, decode, and populate the cache. Resolving first lets an expired or
//! changed current session evict implicit entries before they are served.

// self
use crate::{
	_prelude::*,
	cache::CacheKey,
	client::Gateway,
	http::ApiHttpClient,
	model::{Circuit, Driver, Race, RaceResult, Resource, Team},
	obs::QueryKind,
	query::{CircuitQuery, DriverQuery, RaceQuery, RaceResultsQuery, TeamQuery},
};

impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Drivers matching `query`, scoped to the current session unless one is pinned.
	pub async fn drivers(&self, query: DriverQuery) -> Result<Vec<Driver>> {
		const KIND: QueryKind = QueryKind::Drivers;

		self.observe(KIND, "drivers", async {
			let session_key = self.session_key_or_current(query.session_key).await?;
			let key = CacheKey::new(Resource::Drivers, query.signature());
			let params = query.params(session_key);

			self.cached(KIND, key, query.force, self.fetch_records(&params)).await
		})
		.await
	}

	/// Teams entered in the queried session.
	pub async fn teams(&self, query: TeamQuery) -> Result<Vec<Team>> {
		const KIND: QueryKind = QueryKind::Teams;

		self.observe(KIND, "teams", async {
			let session_key = self.session_key_or_current(query.session_key).await?;
			let key = CacheKey::new(Resource::Teams, query.signature());
			let params = query.params(session_key);

			self.cached(KIND, key, query.force, self.fetch_records(&params)).await
		})
		.await
	}

	/// Races listed for the queried session.
	pub async fn races(&self, query: RaceQuery) -> Result<Vec<Race>> {
		const KIND: QueryKind = QueryKind::Races;

		self.observe(KIND, "races", async {
			let session_key = self.session_key_or_current(query.session_key).await?;
			let key = CacheKey::new(Resource::Races, query.signature());
			let params = query.params(session_key);

			self.cached(KIND, key, query.force, self.fetch_records(&params)).await
		})
		.await
	}

	/// Full circuit catalog.
	pub async fn circuits(&self, query: CircuitQuery) -> Result<Vec<Circuit>> {
		const KIND: QueryKind = QueryKind::Circuits;

		self.observe(KIND, "circuits", async {
			let key = CacheKey::new(Resource::Circuits, query.signature());

			self.cached(KIND, key, query.force, self.fetch_records(&[])).await
		})
		.await
	}

	/// Classified results of one race.
	pub async fn race_results(&self, query: RaceResultsQuery) -> Result<Vec<RaceResult>> {
		const KIND: QueryKind = QueryKind::RaceResults;

		self.observe(KIND, "race_results", async {
			let key = CacheKey::new(Resource::RaceResults, query.signature());
			let params = query.params();

			self.cached(KIND, key, query.force, self.fetch_records(&params)).await
		})
		.await
	}
}
