//! Typed query descriptors accepted by the gateway.
//!
//! Each query knows its cache [`Signature`] and the URL parameters it contributes. Absent
//! filters are omitted from the request entirely rather than sent as defaults; the remote API
//! combines the present ones with logical AND.

// self
use crate::{_prelude::*, cache::Signature};

/// URL parameters for one request, in the order they are appended.
pub type QueryParams = Vec<(&'static str, String)>;

/// Driver lookup; every filter is optional.
///
/// When `session_key` is absent the gateway resolves the current session and scopes the request
/// to it. The signature is derived from the caller's filters before that resolution happens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DriverQuery {
	/// Championship year.
	pub season: Option<i32>,
	/// Meeting key.
	pub meeting_key: Option<u32>,
	/// Session key; defaults to the current session.
	pub session_key: Option<u32>,
	/// Exact team name.
	pub team_name: Option<String>,
	/// Bypasses the cache when true.
	pub force: bool,
}
impl DriverQuery {
	/// Query with no filters (current session, all teams).
	pub fn new() -> Self {
		Self::default()
	}

	/// Filters by championship year.
	pub fn season(mut self, season: i32) -> Self {
		self.season = Some(season);

		self
	}

	/// Filters by meeting.
	pub fn meeting_key(mut self, meeting_key: u32) -> Self {
		self.meeting_key = Some(meeting_key);

		self
	}

	/// Pins the session instead of resolving the current one.
	pub fn session_key(mut self, session_key: u32) -> Self {
		self.session_key = Some(session_key);

		self
	}

	/// Filters by team name.
	pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
		self.team_name = Some(team_name.into());

		self
	}

	/// Forces the gateway to bypass cache checks.
	pub fn force_refresh(mut self) -> Self {
		self.force = true;

		self
	}

	/// Cache signature of the caller-supplied filters.
	pub fn signature(&self) -> Signature {
		Signature::from_filters(
			self.season,
			self.meeting_key,
			self.session_key,
			self.team_name.as_deref(),
		)
	}

	pub(crate) fn params(&self, session_key: u32) -> QueryParams {
		let mut params = vec![("session_key", session_key.to_string())];

		if let Some(season) = self.season {
			params.push(("season", season.to_string()));
		}
		if let Some(meeting_key) = self.meeting_key {
			params.push(("meeting_key", meeting_key.to_string()));
		}
		if let Some(team_name) = &self.team_name {
			params.push(("team_name", team_name.clone()));
		}

		params
	}
}

/// Lookup scoped to a single session (teams, races).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScopedQuery {
	/// Session key; defaults to the current session.
	pub session_key: Option<u32>,
	/// Bypasses the cache when true.
	pub force: bool,
}
impl ScopedQuery {
	/// Query scoped to the current session.
	pub fn current() -> Self {
		Self::default()
	}

	/// Query scoped to an explicit session.
	pub fn for_session(session_key: u32) -> Self {
		Self { session_key: Some(session_key), force: false }
	}

	/// Forces the gateway to bypass cache checks.
	pub fn force_refresh(mut self) -> Self {
		self.force = true;

		self
	}

	/// Cache signature of the caller-supplied filters.
	pub fn signature(&self) -> Signature {
		Signature::from_filters(None, None, self.session_key, None)
	}

	pub(crate) fn params(&self, session_key: u32) -> QueryParams {
		vec![("session_key", session_key.to_string())]
	}
}

/// Team lookup.
pub type TeamQuery = ScopedQuery;
/// Race lookup.
pub type RaceQuery = ScopedQuery;

/// Circuit catalog lookup; takes no filters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CircuitQuery {
	/// Bypasses the cache when true.
	pub force: bool,
}
impl CircuitQuery {
	/// Forces the gateway to bypass cache checks.
	pub fn force_refresh(mut self) -> Self {
		self.force = true;

		self
	}

	/// Cache signature; the catalog has a single entry.
	pub fn signature(&self) -> Signature {
		Signature::from_filters(None, None, None, None)
	}
}

/// Results of one race.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RaceResultsQuery {
	/// Remote race identifier.
	pub race_id: String,
	/// Bypasses the cache when true.
	pub force: bool,
}
impl RaceResultsQuery {
	/// Results for `race_id`.
	pub fn new(race_id: impl Into<String>) -> Self {
		Self { race_id: race_id.into(), force: false }
	}

	/// Forces the gateway to bypass cache checks.
	pub fn force_refresh(mut self) -> Self {
		self.force = true;

		self
	}

	/// Cache signature; the race identifier itself.
	pub fn signature(&self) -> Signature {
		Signature::new(self.race_id.as_str())
	}

	pub(crate) fn params(&self) -> QueryParams {
		vec![("race_id", self.race_id.clone())]
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn driver_params_omit_absent_filters() {
		let params = DriverQuery::new().team_name("Ferrari").params(9158);

		assert_eq!(params, vec![
			("session_key", "9158".to_owned()),
			("team_name", "Ferrari".to_owned())
		]);

		let params = DriverQuery::new().season(2024).meeting_key(1219).params(9158);

		assert_eq!(params, vec![
			("session_key", "9158".to_owned()),
			("season", "2024".to_owned()),
			("meeting_key", "1219".to_owned()),
		]);
	}

	#[test]
	fn driver_signature_ignores_force_flag() {
		let query = DriverQuery::new().session_key(9158);

		assert_eq!(query.signature(), query.clone().force_refresh().signature());
		assert_eq!(query.signature().as_str(), "0-0-9158-");
	}

	#[test]
	fn scoped_signature_distinguishes_current_from_explicit_session() {
		assert_ne!(ScopedQuery::current().signature(), ScopedQuery::for_session(9158).signature());
	}
}
