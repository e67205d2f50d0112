//! Flat OpenF1 records and the resource catalog they are fetched from.

pub mod driver;
pub mod event;
pub mod session;

pub use driver::*;
pub use event::*;
pub use session::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, cache::CachedRecords};

/// OpenF1 collections reachable through the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
	/// `/sessions`
	Sessions,
	/// `/drivers`
	Drivers,
	/// `/teams`
	Teams,
	/// `/races`
	Races,
	/// `/circuits`
	Circuits,
	/// `/race_results`
	RaceResults,
}
impl Resource {
	/// Path segment appended to the API root.
	pub const fn path(self) -> &'static str {
		match self {
			Resource::Sessions => "sessions",
			Resource::Drivers => "drivers",
			Resource::Teams => "teams",
			Resource::Races => "races",
			Resource::Circuits => "circuits",
			Resource::RaceResults => "race_results",
		}
	}
}
impl Display for Resource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.path())
	}
}

/// A record type decoded from one OpenF1 collection.
///
/// Implementations tie a record to its [`Resource`] and know how to move a decoded list in and
/// out of the type-erased [`CachedRecords`] payload stored by response caches.
pub trait ApiRecord
where
	Self: 'static + Clone + Debug + Send + Sync + DeserializeOwned + Serialize,
{
	/// Collection the record is fetched from.
	const RESOURCE: Resource;

	/// Wraps a decoded list for storage in a response cache.
	fn into_cached(records: Vec<Self>) -> CachedRecords;

	/// Copies the list back out when the payload belongs to this record type.
	fn from_cached(cached: &CachedRecords) -> Option<Vec<Self>>;
}

macro_rules! impl_api_record {
	($ty:ty, $variant:ident) => {
		impl ApiRecord for $ty {
			const RESOURCE: Resource = Resource::$variant;

			fn into_cached(records: Vec<Self>) -> CachedRecords {
				CachedRecords::$variant(records.into())
			}

			fn from_cached(cached: &CachedRecords) -> Option<Vec<Self>> {
				match cached {
					CachedRecords::$variant(records) => Some(records.to_vec()),
					_ => None,
				}
			}
		}
	};
}

impl_api_record! { Session, Sessions }
impl_api_record! { Driver, Drivers }
impl_api_record! { Team, Teams }
impl_api_record! { Race, Races }
impl_api_record! { Circuit, Circuits }
impl_api_record! { RaceResult, RaceResults }

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn cached_payload_only_unwraps_into_its_own_record_type() {
		let team = Team { id: 1, name: "McLaren".into() };
		let cached = Team::into_cached(vec![team.clone()]);

		assert_eq!(Team::from_cached(&cached), Some(vec![team]));
		assert!(Driver::from_cached(&cached).is_none());
		assert_eq!(cached.resource(), Resource::Teams);
	}

	#[test]
	fn resource_paths_match_openf1_collections() {
		assert_eq!(Resource::RaceResults.to_string(), "race_results");
		assert_eq!(Driver::RESOURCE.path(), "drivers");
		assert_eq!(
			serde_json::to_string(&Resource::RaceResults).expect("Resource should serialize."),
			"\"race_results\""
		);
	}
}
