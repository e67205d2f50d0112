//! Minimum spacing between outbound requests.

// self
use crate::_prelude::*;

/// Minimum-interval limiter over a monotonic clock.
///
/// The last-request stamp lives under an async mutex that is held across the wait, so the
/// comparison and the new stamp are atomic with respect to concurrent callers.
#[derive(Debug)]
pub struct RateLimiter {
	interval: Duration,
	last_request: AsyncMutex<Option<Instant>>,
}
impl RateLimiter {
	/// Creates a limiter that has never seen a request.
	pub fn new(interval: Duration) -> Self {
		Self { interval, last_request: AsyncMutex::new(None) }
	}

	/// Configured minimum spacing.
	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Suspends until at least `interval` has passed since the previous call, then stamps now.
	///
	/// Returns how long the caller was parked.
	pub async fn wait(&self) -> Duration {
		let mut last_request = self.last_request.lock().await;
		let mut waited = Duration::ZERO;

		if let Some(previous) = *last_request {
			let elapsed = previous.elapsed();

			if elapsed < self.interval {
				waited = self.interval - elapsed;

				tokio::time::sleep(waited).await;
			}
		}

		*last_request = Some(Instant::now());

		waited
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test(start_paused = true)]
	async fn sequential_calls_are_spaced_by_the_interval() {
		let limiter = RateLimiter::new(Duration::from_secs(5));
		let mut starts = Vec::new();

		for _ in 0..4 {
			limiter.wait().await;
			starts.push(Instant::now());
		}

		for pair in starts.windows(2) {
			assert!(pair[1] - pair[0] >= limiter.interval());
		}
	}

	#[tokio::test(start_paused = true)]
	async fn first_call_and_late_calls_do_not_wait() {
		let limiter = RateLimiter::new(Duration::from_secs(5));

		assert_eq!(limiter.wait().await, Duration::ZERO);

		tokio::time::advance(Duration::from_secs(7)).await;

		assert_eq!(limiter.wait().await, Duration::ZERO);

		tokio::time::advance(Duration::from_secs(2)).await;

		assert_eq!(limiter.wait().await, Duration::from_secs(3));
	}
}
