//! Linear backoff for throttled requests.

// self
use crate::_prelude::*;

/// Linear backoff policy for HTTP 429 responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Base spacing; also the backoff unit.
	pub interval: Duration,
	/// Attempts per request, including the first.
	pub max_attempts: u32,
}
impl RetryPolicy {
	/// Creates a policy with the given unit and budget.
	pub fn new(interval: Duration, max_attempts: u32) -> Self {
		Self { interval, max_attempts }
	}

	/// Sleep applied after the `attempt`-th (1-based) throttled response.
	pub fn backoff(&self, attempt: u32) -> Duration {
		self.interval.saturating_mul(attempt)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn backoff_grows_linearly() {
		let policy = RetryPolicy::new(Duration::from_secs(5), 3);

		assert_eq!(policy.backoff(1), Duration::from_secs(5));
		assert_eq!(policy.backoff(2), Duration::from_secs(10));
		assert_eq!(policy.backoff(3), Duration::from_secs(15));
	}
}
