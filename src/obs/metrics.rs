// self
use crate::{
	http::ResponseMetadata,
	obs::{QueryKind, QueryOutcome},
};

/// Records a query outcome via the global metrics recorder (when enabled).
pub fn record_query_outcome(kind: QueryKind, outcome: QueryOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"openf1_gateway_query_total",
			"query" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records a throttled attempt (counter + tracing event).
pub fn record_throttled(attempt: u32, meta: &ResponseMetadata) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("openf1_gateway_throttled_total").increment(1);
	}

	super::tracing::trace_throttled(attempt, meta);
}
