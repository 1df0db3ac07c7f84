//! Thread-safe in-memory [`SessionStore`] implementation.

// self
use crate::{
	_prelude::*,
	session::{BearerToken, Session, SessionStore, UserProfile},
};

/// Default session store keeping the single session in-process behind a lock.
///
/// Suitable for real clients as well as tests; the session in this system is
/// inherently in-memory (the continuation credential lives in the transport's
/// cookie store, not here).
#[derive(Debug, Default)]
pub struct MemorySessionStore(RwLock<Session>);
impl MemorySessionStore {
	/// Creates a store pre-seeded with the provided session, for tests and
	/// restore-on-startup flows.
	pub fn with_session(session: Session) -> Self {
		Self(RwLock::new(session))
	}
}
impl SessionStore for MemorySessionStore {
	fn snapshot(&self) -> Session {
		self.0.read().clone()
	}

	fn establish(&self, user: UserProfile, email: Option<String>, token: BearerToken) {
		*self.0.write() =
			Session { user: Some(user), email, token: Some(token), authenticated: true };
	}

	fn replace_token(&self, token: BearerToken) -> bool {
		let mut session = self.0.write();

		if session.user.is_none() {
			return false;
		}

		session.token = Some(token);
		session.authenticated = true;

		true
	}

	fn update_user(&self, user: UserProfile) -> bool {
		let mut session = self.0.write();

		if session.user.is_none() {
			return false;
		}

		session.user = Some(user);

		true
	}

	fn update_points(&self, points: i64) -> bool {
		let mut session = self.0.write();

		match session.user.as_mut() {
			Some(user) => {
				user.points = points;

				true
			},
			None => false,
		}
	}

	fn clear(&self) {
		*self.0.write() = Session::default();
	}
}
