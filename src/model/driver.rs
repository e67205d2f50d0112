//! Per-session driver records.

// self
use crate::_prelude::*;

/// Driver snapshot tied to a single session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
	/// Car number.
	pub driver_number: u32,
	/// Session the snapshot was taken from.
	pub session_key: u32,
	/// Meeting the snapshot was taken from.
	pub meeting_key: u32,
	/// Name as shown on broadcast graphics, e.g. `M VERSTAPPEN`.
	pub broadcast_name: String,
	/// Full display name.
	pub full_name: String,
	/// Three-letter acronym.
	pub name_acronym: String,
	/// Given name.
	pub first_name: Option<String>,
	/// Family name.
	pub last_name: Option<String>,
	/// ISO country code; OpenF1 leaves it null for some entrants.
	pub country_code: Option<String>,
	/// Team name at the time of the session.
	pub team_name: Option<String>,
	/// Team livery colour as a hex string without `#`.
	#[serde(rename = "team_colour")]
	pub team_color: Option<String>,
	/// Headshot image URL.
	pub headshot_url: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn tolerates_null_optional_fields() {
		let payload = r#"{
			"driver_number": 1,
			"session_key": 9158,
			"meeting_key": 1219,
			"broadcast_name": "M VERSTAPPEN",
			"full_name": "Max VERSTAPPEN",
			"name_acronym": "VER",
			"first_name": "Max",
			"last_name": "Verstappen",
			"country_code": null,
			"team_name": "Red Bull Racing",
			"team_colour": "3671C6",
			"headshot_url": null
		}"#;
		let driver: Driver =
			serde_json::from_str(payload).expect("OpenF1 driver payload should decode.");

		assert_eq!(driver.team_color.as_deref(), Some("3671C6"));
		assert!(driver.country_code.is_none());
		assert!(driver.headshot_url.is_none());
	}
}
