//! Outbound pacing: a single-permit gate, a minimum-interval limiter, and retry on HTTP 429.
//!
//! OpenF1 enforces a global (not per-endpoint) limit, so every request the gateway issues goes
//! through the same [`Throttle`]. The gate keeps at most one request in flight; the limiter
//! spaces attempts (retries included) by at least the configured interval; the retry policy
//! sleeps `interval × attempt` after each 429 while still holding the gate.

pub mod limiter;
pub mod retry;

pub use limiter::RateLimiter;
pub use retry::RetryPolicy;

// self
use crate::{
	_prelude::*,
	http::{ApiHttpClient, ApiResponse, ResponseMetadata},
	obs,
};

/// Gate, limiter, and retry policy shared by every query a gateway issues.
#[derive(Debug)]
pub struct Throttle {
	gate: Semaphore,
	limiter: RateLimiter,
	policy: RetryPolicy,
}
impl Throttle {
	/// Creates a throttle with a fresh gate and limiter.
	pub fn new(policy: RetryPolicy) -> Self {
		Self { gate: Semaphore::new(1), limiter: RateLimiter::new(policy.interval), policy }
	}

	/// Retry policy in effect.
	pub fn policy(&self) -> &RetryPolicy {
		&self.policy
	}

	/// Performs a paced GET with retry on throttling.
	///
	/// The gate permit is held for the whole exchange, backoff included, and released on every
	/// exit path when the permit guard drops. Transport failures abort immediately. Any non-429
	/// response is returned untouched for the caller to decode.
	pub async fn send<C>(&self, http_client: &C, url: &Url) -> Result<ApiResponse>
	where
		C: ?Sized + ApiHttpClient,
	{
		let _permit = self.gate.acquire().await;
		let mut last = ResponseMetadata::default();

		for attempt in 1..=self.policy.max_attempts {
			self.limiter.wait().await;

			let response = http_client.get(url).await?;

			if !response.meta.is_throttled() {
				return Ok(response);
			}

			obs::record_throttled(attempt, &response.meta);

			last = response.meta;

			if attempt < self.policy.max_attempts {
				tokio::time::sleep(self.policy.backoff(attempt)).await;
			}
		}

		Err(Error::ThrottledExhausted {
			attempts: self.policy.max_attempts,
			last_status: last.status,
			retry_after: last.retry_after,
		})
	}
}
