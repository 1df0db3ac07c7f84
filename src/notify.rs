//! User-facing failure notification seam.
//!
//! The gateway mirrors every surfaced failure to a [`Notifier`] so front ends
//! can show a toast (or equivalent) without inspecting errors at each call
//! site. The default [`NoopNotifier`] swallows notifications for headless use.

// self
use crate::{_prelude::*, error::FailureCategory};

/// Sink for user-facing failure notifications emitted by the gateway.
pub trait Notifier
where
	Self: Send + Sync,
{
	/// Reports a surfaced failure with its presentation category and message.
	fn failure(&self, category: FailureCategory, message: &str);
}

/// Notifier that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;
impl Notifier for NoopNotifier {
	fn failure(&self, _: FailureCategory, _: &str) {}
}

/// A single failure notification captured by [`RecordingNotifier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureEvent {
	/// Presentation category the gateway attached.
	pub category: FailureCategory,
	/// Message that would have been shown to the user.
	pub message: String,
}

/// Thread-safe notifier that records events in-process for tests and demos.
#[derive(Debug, Default)]
pub struct RecordingNotifier(Mutex<Vec<FailureEvent>>);
impl RecordingNotifier {
	/// Returns a copy of every event captured so far.
	pub fn events(&self) -> Vec<FailureEvent> {
		self.0.lock().clone()
	}

	/// Returns the captured categories in emission order.
	pub fn categories(&self) -> Vec<FailureCategory> {
		self.0.lock().iter().map(|event| event.category).collect()
	}
}
impl Notifier for RecordingNotifier {
	fn failure(&self, category: FailureCategory, message: &str) {
		self.0.lock().push(FailureEvent { category, message: message.to_owned() });
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_notifier_captures_in_order() {
		let notifier = RecordingNotifier::default();

		notifier.failure(FailureCategory::NotFound, "Resource not found");
		notifier.failure(FailureCategory::SessionExpired, "Session expired. Please login again.");

		assert_eq!(
			notifier.categories(),
			vec![FailureCategory::NotFound, FailureCategory::SessionExpired],
		);
		assert_eq!(notifier.events()[0].message, "Resource not found");
	}
}
