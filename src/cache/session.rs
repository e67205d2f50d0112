//! Memoized "current session" slot.

// self
use crate::{_prelude::*, model::Session};

/// Single-value slot holding the resolved current session.
///
/// Unlike the keyed response cache this slot has no signature: there is exactly one current
/// session per gateway. It can expire after a TTL or be cleared manually so a long-running
/// process does not stay pinned to a session that has aged out.
#[derive(Debug, Default)]
pub struct SessionSlot {
	slot: RwLock<Option<(Session, Instant)>>,
	ttl: Option<Duration>,
}
impl SessionSlot {
	/// Creates an empty slot whose value expires `ttl` after it was stored (never when `None`).
	pub fn new(ttl: Option<Duration>) -> Self {
		Self { slot: RwLock::new(None), ttl }
	}

	/// Returns the memoized session while it is still fresh.
	pub fn get(&self) -> Option<Session> {
		let slot = self.slot.read();
		let (session, stored_at) = slot.as_ref()?;
		let fresh = match self.ttl {
			Some(ttl) => stored_at.elapsed() < ttl,
			None => true,
		};

		fresh.then(|| session.clone())
	}

	/// Stores `session` as the current session, returning the previous value even if it had expired.
	pub fn set(&self, session: Session) -> Option<Session> {
		self.slot.write().replace((session, Instant::now())).map(|(previous, _)| previous)
	}

	/// Clears the slot, returning the previous value.
	pub fn invalidate(&self) -> Option<Session> {
		self.slot.write().take().map(|(session, _)| session)
	}
}
