//! Thread-safe in-memory [`RecordSink`] for local development and tests.

// self
use crate::{
	_prelude::*,
	cache::CacheKey,
	store::{RecordBatch, RecordSink, StoreError, StoreFuture},
};

type BatchMap = Arc<RwLock<HashMap<CacheKey, RecordBatch>>>;

/// Sink that keeps the latest batch per cache key in-process.
#[derive(Clone, Debug, Default)]
pub struct MemorySink(BatchMap);
impl MemorySink {
	/// Latest batch persisted under `key`.
	pub fn latest(&self, key: &CacheKey) -> Option<RecordBatch> {
		self.0.read().get(key).cloned()
	}

	/// Number of distinct keys persisted.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when nothing has been persisted.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn persist_now(map: BatchMap, batch: RecordBatch) -> Result<(), StoreError> {
		map.write().insert(batch.key.clone(), batch);

		Ok(())
	}
}
impl RecordSink for MemorySink {
	fn persist(&self, batch: RecordBatch) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::persist_now(map, batch) })
	}
}
