//! Session-aware client for the TaskWheel task API—an authenticated request gateway with
//! one-shot refresh-and-retry, typed task endpoints, and transport-aware observability.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod error;
pub mod gateway;
pub mod http;
pub mod notify;
pub mod obs;
pub mod session;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use time::macros::datetime;
	// self
	use crate::{
		gateway::{Gateway, ReqwestGateway},
		http::ReqwestHttpClient,
		notify::RecordingNotifier,
		session::{BearerToken, MemorySessionStore, SessionStore, UserProfile},
	};

	/// Gateway type alias used by reqwest-backed integration tests.
	pub type ReqwestTestGateway = ReqwestGateway;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.cookie_store(true)
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Gateway`] backed by an in-memory session store, a recording notifier,
	/// and the reqwest transport used across integration tests.
	pub fn build_reqwest_test_gateway(
		base_url: &str,
	) -> (ReqwestTestGateway, Arc<MemorySessionStore>, Arc<RecordingNotifier>) {
		let session = Arc::new(MemorySessionStore::default());
		let notifier = Arc::new(RecordingNotifier::default());
		let url = Url::parse(base_url).expect("Failed to parse test base URL.");
		let gateway =
			Gateway::with_http_client(session.clone(), url, test_reqwest_http_client())
				.with_notifier(notifier.clone());

		(gateway, session, notifier)
	}

	/// Returns a deterministic profile fixture.
	pub fn test_profile() -> UserProfile {
		UserProfile {
			id: "665f1c2e9b1d8c0012a4f001".into(),
			name: "Test User".into(),
			email: "user@example.com".into(),
			points: 0,
			created_at: datetime!(2025-01-01 00:00 UTC),
			updated_at: datetime!(2025-01-01 00:00 UTC),
		}
	}

	/// Installs a signed-in session carrying the provided bearer token.
	pub fn seed_session(store: &MemorySessionStore, token: &str) -> UserProfile {
		let profile = test_profile();

		store.establish(profile.clone(), Some(profile.email.clone()), BearerToken::new(token));

		profile
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))]
use {color_eyre as _, httpmock as _, taskwheel_client as _, tokio as _};
