#![cfg(feature = "reqwest")]

// self
use taskwheel_client::{
	_preludet::*,
	session::{BearerToken, MemorySessionStore, Session, SessionStore},
};

#[test]
fn establish_then_snapshot_round_trips() {
	let store = MemorySessionStore::default();
	let profile = test_profile();

	store.establish(profile.clone(), Some(profile.email.clone()), BearerToken::new("T1"));

	let session = store.snapshot();

	assert!(session.authenticated);
	assert_eq!(session.user, Some(profile));
	assert_eq!(session.email.as_deref(), Some("user@example.com"));
	assert_eq!(session.token.as_ref().map(|token| token.expose()), Some("T1"));
}

#[test]
fn replace_token_requires_a_user_record() {
	let store = MemorySessionStore::default();

	assert!(
		!store.replace_token(BearerToken::new("T2")),
		"Token swap must be refused on an empty session.",
	);
	assert!(store.snapshot().token.is_none(), "Refused swap must not install a token.");

	seed_session(&store, "T1");

	assert!(store.replace_token(BearerToken::new("T2")));
	assert_eq!(store.snapshot().token.as_ref().map(|token| token.expose()), Some("T2"));
}

#[test]
fn update_points_touches_only_the_tally() {
	let store = MemorySessionStore::default();

	assert!(!store.update_points(50));

	let profile = seed_session(&store, "T1");

	assert!(store.update_points(50));

	let session = store.snapshot();
	let user = session.user.expect("User should survive a points update.");

	assert_eq!(user.points, 50);
	assert_eq!(user.name, profile.name);
	assert_eq!(session.token.as_ref().map(|token| token.expose()), Some("T1"));
}

#[test]
fn update_user_replaces_the_profile() {
	let store = MemorySessionStore::default();

	assert!(!store.update_user(test_profile()));

	seed_session(&store, "T1");

	let mut renamed = test_profile();

	renamed.name = "Renamed User".into();

	assert!(store.update_user(renamed));
	assert_eq!(store.snapshot().user.map(|user| user.name), Some("Renamed User".into()));
}

#[test]
fn clear_resets_to_the_empty_session() {
	let store = MemorySessionStore::default();

	seed_session(&store, "T1");
	store.clear();

	assert_eq!(store.snapshot(), Session::default());
	assert!(store.snapshot().is_empty());
}

#[test]
fn with_session_restores_prior_state() {
	let profile = test_profile();
	let session = Session {
		user: Some(profile.clone()),
		email: Some(profile.email.clone()),
		token: Some(BearerToken::new("T9")),
		authenticated: true,
	};
	let store = MemorySessionStore::with_session(session.clone());

	assert_eq!(store.snapshot(), session);
}
