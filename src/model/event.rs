//! Team, race, circuit, and result records. No relationships are modeled here.

// self
use crate::_prelude::*;

/// Constructor entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
	/// Remote identifier.
	pub id: u32,
	/// Team name.
	pub name: String,
}

/// Grand prix entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
	/// Remote identifier.
	pub id: u32,
	/// Event name.
	pub name: String,
	/// Circuit name.
	pub circuit: String,
	/// Race date as reported upstream.
	pub date: String,
	/// Championship round.
	pub round: u32,
	/// Scheduled, completed, cancelled, …
	pub status: String,
}

/// Circuit entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
	/// Remote identifier.
	pub id: u32,
	/// Circuit name.
	pub name: String,
	/// City or region.
	pub location: String,
	/// Host country.
	pub country: String,
}

/// Classified finisher of a race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
	/// Finishing position.
	pub position: u32,
	/// Car number.
	pub driver_number: u32,
	/// Driver display name.
	pub driver_name: String,
	/// Team name.
	pub team: String,
	/// Completed laps.
	pub laps: u32,
	/// Race time or gap as reported upstream.
	pub time: String,
	/// Championship points awarded.
	pub points: f64,
}
