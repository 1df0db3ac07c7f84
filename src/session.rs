//! Session state, the bearer credential wrapper, and the session-store capability.

pub mod memory;
pub mod token;

pub use memory::MemorySessionStore;
pub use token::BearerToken;

// self
use crate::_prelude::*;

/// Profile record for the authenticated user, as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	/// Server-assigned identifier.
	#[serde(rename = "_id")]
	pub id: String,
	/// Display name.
	pub name: String,
	/// Account email address.
	pub email: String,
	/// Accumulated reward points.
	pub points: i64,
	/// Creation instant recorded by the API.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Last-update instant recorded by the API.
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// In-memory record of the current authenticated user and bearer token.
///
/// Exactly one session is active per store. An empty (logged-out) session has
/// every field absent and `authenticated` false; mutation is restricted to the
/// gateway's refresh recovery and the auth endpoint operations, both of which
/// go through a [`SessionStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
	/// Profile of the signed-in user, if known.
	pub user: Option<UserProfile>,
	/// Email captured during flows that know it before a profile exists.
	pub email: Option<String>,
	/// Short-lived bearer credential sent with protected requests.
	pub token: Option<BearerToken>,
	/// Whether the session is considered signed in.
	pub authenticated: bool,
}
impl Session {
	/// Returns `true` when neither a user nor a token is present.
	pub fn is_empty(&self) -> bool {
		self.user.is_none() && self.token.is_none()
	}
}

/// Capability for reading and mutating the single client session.
///
/// The gateway takes this as an injected `Arc<dyn SessionStore>` instead of
/// reaching for ambient global state, so it can run against a fake store in
/// tests. Implementations must apply each mutation atomically; in particular
/// [`replace_token`](SessionStore::replace_token) must check for the user
/// record and swap the token under one lock so a concurrent logout cannot
/// interleave.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Returns a point-in-time copy of the session.
	fn snapshot(&self) -> Session;

	/// Installs a signed-in session for the provided user and token.
	fn establish(&self, user: UserProfile, email: Option<String>, token: BearerToken);

	/// Swaps the bearer token, keeping the user record.
	///
	/// Returns `false` without mutating when no user record exists; the
	/// refresh protocol treats that as an expired session.
	fn replace_token(&self, token: BearerToken) -> bool;

	/// Replaces the stored user profile, if a session is established.
	///
	/// Returns `false` when no user record exists.
	fn update_user(&self, user: UserProfile) -> bool;

	/// Overwrites the signed-in user's points tally.
	///
	/// Returns `false` when no user record exists.
	fn update_points(&self, points: i64) -> bool;

	/// Destroys the session (forced logout).
	fn clear(&self);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_session_has_nothing_to_send() {
		let session = Session::default();

		assert!(session.is_empty());
		assert!(!session.authenticated);
		assert!(session.token.is_none());
	}

	#[test]
	fn profile_deserializes_from_the_wire_shape() {
		let payload = r#"{
			"_id": "665f1c2e9b1d8c0012a4f001",
			"name": "Rafi",
			"email": "rafi@example.com",
			"points": 120,
			"createdAt": "2025-05-01T10:00:00Z",
			"updatedAt": "2025-05-02T11:30:00Z"
		}"#;
		let profile: UserProfile =
			serde_json::from_str(payload).expect("Profile payload should deserialize.");

		assert_eq!(profile.id, "665f1c2e9b1d8c0012a4f001");
		assert_eq!(profile.points, 120);
		assert_eq!(profile.created_at.year(), 2025);
	}
}
