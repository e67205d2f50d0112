//! Persistence hand-off contracts for freshly fetched records.
//!
//! The gateway does not model relationships or schemas; it only hands plain, already-decoded
//! batches to whatever [`RecordSink`] the caller plugs in. Cache hits are never re-persisted.

pub mod memory;

pub use memory::MemorySink;

// self
use crate::{
	_prelude::*,
	cache::{CacheKey, CachedRecords},
};

/// Future returned by [`RecordSink`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence backend contract for fetched records.
pub trait RecordSink
where
	Self: Send + Sync,
{
	/// Persists one fetched batch, replacing any earlier batch under the same key.
	fn persist(&self, batch: RecordBatch) -> StoreFuture<'_, ()>;
}

/// Records fetched by one query.
#[derive(Clone, Debug)]
pub struct RecordBatch {
	/// Cache key of the query that produced the batch.
	pub key: CacheKey,
	/// Decoded records.
	pub records: CachedRecords,
	/// Wall-clock instant the batch was decoded.
	pub fetched_at: OffsetDateTime,
}
impl RecordBatch {
	/// Stamps a batch with the current UTC instant.
	pub fn new(key: CacheKey, records: CachedRecords) -> Self {
		Self { key, records, fetched_at: OffsetDateTime::now_utc() }
	}
}

/// Error type produced by [`RecordSink`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_gateway_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let gateway_error: Error = store_error.clone().into();

		assert!(matches!(gateway_error, Error::Storage(_)));
		assert!(gateway_error.to_string().contains("database unreachable"));

		let source = StdError::source(&gateway_error)
			.expect("Gateway error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
