//! Competition sessions and season arithmetic.

// crates.io
use time::Month;
// self
use crate::_prelude::*;

/// A scheduled competition session (practice, qualifying, sprint, race).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// OpenF1 session key.
	pub session_key: u32,
	/// Meeting (grand prix weekend) the session belongs to.
	pub meeting_key: u32,
	/// Display name, e.g. `Practice 1` or `Race`.
	pub session_name: String,
	/// Host country.
	pub country_name: String,
	/// Championship year.
	pub year: i32,
	/// Scheduled start.
	#[serde(with = "time::serde::rfc3339")]
	pub date_start: OffsetDateTime,
	/// Scheduled end.
	#[serde(with = "time::serde::rfc3339")]
	pub date_end: OffsetDateTime,
}
impl Session {
	/// Returns `true` once the session start is not after `now`.
	pub fn has_started_at(&self, now: OffsetDateTime) -> bool {
		self.date_start <= now
	}
}

/// Championship season in effect at `now`.
///
/// January and February still belong to the previous season's off-season, so they map to the
/// prior year.
pub fn current_season(now: OffsetDateTime) -> i32 {
	if u8::from(now.month()) < u8::from(Month::March) { now.year() - 1 } else { now.year() }
}
