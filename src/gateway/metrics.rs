//! Always-on gateway counters, independent of the optional `metrics` feature.

// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for gateway activity.
#[derive(Debug, Default)]
pub struct GatewayMetrics {
	attempts: AtomicU64,
	refresh_attempts: AtomicU64,
	refresh_failures: AtomicU64,
	refresh_coalesced: AtomicU64,
	retries: AtomicU64,
	session_clears: AtomicU64,
}
impl GatewayMetrics {
	/// Returns the total number of dispatched calls.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of refresh recoveries entered.
	pub fn refresh_attempts(&self) -> u64 {
		self.refresh_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of refresh recoveries that ended in forced logout.
	pub fn refresh_failures(&self) -> u64 {
		self.refresh_failures.load(Ordering::Relaxed)
	}

	/// Returns the number of recoveries that reused a concurrent refresh's
	/// token instead of refreshing again.
	pub fn refresh_coalesced(&self) -> u64 {
		self.refresh_coalesced.load(Ordering::Relaxed)
	}

	/// Returns the number of one-shot retries issued after a refresh.
	pub fn retries(&self) -> u64 {
		self.retries.load(Ordering::Relaxed)
	}

	/// Returns the number of forced session clears.
	pub fn session_clears(&self) -> u64 {
		self.session_clears.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_attempt(&self) {
		self.refresh_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_failure(&self) {
		self.refresh_failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_coalesced(&self) {
		self.refresh_coalesced.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_retry(&self) {
		self.retries.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_session_clear(&self) {
		self.session_clears.fetch_add(1, Ordering::Relaxed);
	}
}
