//! Current-session resolution.
//!
//! The current session is the most recently started session that actually has driver data.
//! Resolution fetches the full session list and probes `/drivers?session_key=…` for started
//! candidates. Each probe is an ordinary paced request, so resolution is the slowest path the
//! gateway has; its result is memoized in the [`SessionSlot`](crate::cache::SessionSlot) and a
//! single-flight guard keeps concurrent callers from repeating the fan-out.
//!
//! Whenever the current session changes (first resolution, manual invalidation, or a refresh or
//! expiry that lands on a different session) the cache entries of queries that omitted the
//! session are evicted.

// self
use crate::{
	_prelude::*,
	cache::CacheKey,
	client::Gateway,
	error::EmptyResultError,
	http::ApiHttpClient,
	model::{Driver, Session},
	obs::{self, QueryKind, QueryOutcome},
};

impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Returns the memoized current session, resolving it on first use or after expiry.
	pub async fn current_session(&self) -> Result<Session> {
		self.observe(QueryKind::CurrentSession, "current_session", self.current_session_cached(false))
			.await
	}

	/// Re-resolves the current session even if a memoized value is still fresh.
	pub async fn refresh_current_session(&self) -> Result<Session> {
		self.observe(
			QueryKind::CurrentSession,
			"refresh_current_session",
			self.current_session_cached(true),
		)
		.await
	}

	/// Drops the memoized current session, returning it.
	///
	/// Cached driver, team, and race lists fetched without an explicit session are dropped too,
	/// so the next implicit query re-resolves and refetches.
	pub fn invalidate_current_session(&self) -> Option<Session> {
		let previous = self.session.invalidate();

		self.evict_current_session_entries();

		previous
	}

	/// Resolves the current session as of `now` without touching the memoized value.
	///
	/// Sessions starting after `now` are skipped, as are sessions whose driver probe comes back
	/// empty or fails. Among the rest the latest start wins; on equal starts the one listed
	/// first by OpenF1 wins. Candidates are probed newest first, so the first one with data is
	/// the answer and older sessions are never probed.
	pub async fn resolve_current_session(&self, now: OffsetDateTime) -> Result<Session> {
		let sessions = self.fetch_records::<Session>(&[]).await?;

		if sessions.is_empty() {
			return Err(EmptyResultError::NoSessions.into());
		}

		let mut candidates =
			sessions.into_iter().filter(|session| session.has_started_at(now)).collect::<Vec<_>>();

		// Stable, so equal starts keep their listing order.
		candidates.sort_by(|a, b| b.date_start.cmp(&a.date_start));

		let mut probed = 0;

		for session in candidates {
			probed += 1;

			let params = [("session_key", session.session_key.to_string())];

			match self.fetch_records::<Driver>(&params).await {
				Ok(drivers) if !drivers.is_empty() => return Ok(session),
				Ok(_) => obs::trace_probe_skipped(session.session_key, &"no driver data"),
				Err(err) => obs::trace_probe_skipped(session.session_key, &err),
			}
		}

		Err(EmptyResultError::NoRecentSessionWithData { probed }.into())
	}

	pub(crate) async fn session_key_or_current(&self, session_key: Option<u32>) -> Result<u32> {
		match session_key {
			Some(session_key) => Ok(session_key),
			None => Ok(self.current_session_cached(false).await?.session_key),
		}
	}

	async fn current_session_cached(&self, force: bool) -> Result<Session> {
		let memoized = || if force { None } else { self.session.get() };

		if let Some(session) = memoized() {
			obs::record_query_outcome(QueryKind::CurrentSession, QueryOutcome::CacheHit);

			return Ok(session);
		}

		let _singleflight = self.session_guard.lock().await;

		// Someone else may have resolved it while this caller waited on the guard.
		if let Some(session) = memoized() {
			return Ok(session);
		}

		let session = self.resolve_current_session(OffsetDateTime::now_utc()).await?;
		let previous = self.session.set(session.clone());

		if previous.is_none_or(|previous| previous.session_key != session.session_key) {
			self.evict_current_session_entries();
		}

		Ok(session)
	}

	fn evict_current_session_entries(&self) {
		let evicted = self.cache.invalidate_where(&CacheKey::follows_current_session);

		obs::trace_session_entries_evicted(evicted);
	}
}
