// self
use crate::{_prelude::*, http::ResponseMetadata, obs::QueryKind};

/// Runs `fut` inside an `openf1_gateway.query` span tagged with `kind` and `stage`.
///
/// Without the `tracing` feature the future is returned as-is.
pub fn in_query_span<F>(
	kind: QueryKind,
	stage: &'static str,
	fut: F,
) -> impl Future<Output = F::Output>
where
	F: Future,
{
	#[cfg(feature = "tracing")]
	{
		use tracing::Instrument;

		fut.instrument(tracing::info_span!("openf1_gateway.query", query = kind.as_str(), stage))
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, stage);

		fut
	}
}

/// Emits a warning for a throttled attempt.
pub(crate) fn trace_throttled(attempt: u32, meta: &ResponseMetadata) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			attempt,
			status = meta.status,
			retry_after_ms = meta.retry_after.map(|d| d.as_millis() as u64),
			"OpenF1 throttled the request"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (attempt, meta);
	}
}

/// Emits a debug event when a current-session change evicts implicit-session cache entries.
pub fn trace_session_entries_evicted(evicted: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(evicted, "Current session changed, evicted implicit-session entries");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = evicted;
	}
}

/// Emits a debug event when a session candidate is skipped during resolution.
pub fn trace_probe_skipped(session_key: u32, reason: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(session_key, %reason, "Skipping session candidate");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (session_key, reason);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn query_span_passes_the_output_through() {
		let value = in_query_span(QueryKind::Drivers, "drivers", async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn events_are_noops_without_subscriber() {
		trace_throttled(1, &ResponseMetadata { status: 429, retry_after: None });
		trace_probe_skipped(9158, &"no drivers");
		trace_session_entries_evicted(3);
	}
}
