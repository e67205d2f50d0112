//! Optional observability helpers for gateway queries.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run each query inside a span named `openf1_gateway.query` with the
//!   `query` and `stage` fields, and to emit events for throttled attempts and skipped session
//!   probes.
//! - Enable `metrics` to increment `openf1_gateway_query_total` for every
//!   attempt/cache_hit/success/failure (labeled by `query` + `outcome`) and
//!   `openf1_gateway_throttled_total` for every HTTP 429.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Query kinds observed by the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
	/// Driver lookups.
	Drivers,
	/// Team lookups.
	Teams,
	/// Race lookups.
	Races,
	/// Circuit catalog.
	Circuits,
	/// Race results.
	RaceResults,
	/// Current-session resolution.
	CurrentSession,
}
impl QueryKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			QueryKind::Drivers => "drivers",
			QueryKind::Teams => "teams",
			QueryKind::Races => "races",
			QueryKind::Circuits => "circuits",
			QueryKind::RaceResults => "race_results",
			QueryKind::CurrentSession => "current_session",
		}
	}
}
impl Display for QueryKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryOutcome {
	/// Entry to a query method.
	Attempt,
	/// Served from cache without touching the network.
	CacheHit,
	/// Successful completion after a fetch.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl QueryOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			QueryOutcome::Attempt => "attempt",
			QueryOutcome::CacheHit => "cache_hit",
			QueryOutcome::Success => "success",
			QueryOutcome::Failure => "failure",
		}
	}
}
impl Display for QueryOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
