//! The authenticated request gateway.
//!
//! Every outbound API call funnels through [`Gateway::send`], which attaches
//! the session's bearer credential, interprets the response status, and
//! recovers from an expired session exactly once per call via the refresh
//! protocol in [`refresh`].

pub mod metrics;
pub mod refresh;

mod send;

pub use metrics::GatewayMetrics;

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::{ApiHttpClient, Method},
	notify::{NoopNotifier, Notifier},
	session::SessionStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway = Gateway<ReqwestHttpClient>;

/// Ephemeral descriptor for one outbound API call.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
	/// Path below the base origin, beginning with `/`.
	pub path: String,
	/// HTTP method to issue.
	pub method: Method,
	/// JSON body to send, if any.
	pub body: Option<serde_json::Value>,
	/// Skips bearer attachment for public endpoints (login, register, ...).
	pub skip_auth: bool,
}
impl RequestDescriptor {
	/// Creates a descriptor for the provided method and path.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { path: path.into(), method, body: None, skip_auth: false }
	}

	/// Shorthand for a GET descriptor.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// Shorthand for a POST descriptor.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// Shorthand for a PUT descriptor.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	/// Shorthand for a PATCH descriptor.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::Patch, path)
	}

	/// Shorthand for a DELETE descriptor.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Attaches a JSON body serialized from `body`.
	pub fn json<B>(mut self, body: &B) -> Result<Self>
	where
		B: ?Sized + Serialize,
	{
		self.body =
			Some(serde_json::to_value(body).map_err(|source| ConfigError::InvalidBody { source })?);

		Ok(self)
	}

	/// Marks the call public so no bearer credential is attached.
	pub fn skip_auth(mut self) -> Self {
		self.skip_auth = true;

		self
	}
}

/// Centralizes credential attachment and one-shot session recovery for every
/// outbound API call.
///
/// The gateway owns the transport, the injected [`SessionStore`], the base
/// origin, and the [`Notifier`], so endpoint operations can focus on their
/// request/response shapes. Cloning is cheap; clones share the session store,
/// metrics, and the single-flight refresh guard.
#[derive(Clone)]
pub struct Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP transport used for every outbound call.
	pub http_client: Arc<C>,
	/// Session capability consulted and mutated by the gateway.
	pub session: Arc<dyn SessionStore>,
	/// Sink for user-facing failure notifications.
	pub notifier: Arc<dyn Notifier>,
	/// Base origin every path is resolved against, e.g. `https://host/api`.
	pub base_url: Url,
	/// Fixed refresh endpoint path.
	pub refresh_path: String,
	/// Per-request timeout enforced by the transport.
	pub timeout: Duration,
	/// Shared counters for gateway activity.
	pub metrics: Arc<GatewayMetrics>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Default refresh endpoint path.
	pub const DEFAULT_REFRESH_PATH: &'static str = "/auth/refresh-token";
	/// Default per-request timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::seconds(30);

	/// Creates a gateway that reuses the caller-provided transport.
	pub fn with_http_client(
		session: Arc<dyn SessionStore>,
		base_url: Url,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			session,
			notifier: Arc::new(NoopNotifier),
			base_url,
			refresh_path: Self::DEFAULT_REFRESH_PATH.into(),
			timeout: Self::DEFAULT_TIMEOUT,
			metrics: Default::default(),
			refresh_guard: Default::default(),
		}
	}

	/// Sets or replaces the failure notification sink.
	pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = notifier;

		self
	}

	/// Overrides the refresh endpoint path.
	pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = path.into();

		self
	}

	/// Overrides the per-request timeout (defaults to 30 seconds).
	pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
		if !timeout.is_positive() {
			return Err(ConfigError::NonPositiveTimeout.into());
		}

		self.timeout = timeout;

		Ok(self)
	}

	/// Resolves a descriptor path against the base origin.
	///
	/// The base origin may carry a path prefix (`/api`), so the two are
	/// concatenated rather than RFC 3986-joined.
	pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, ConfigError> {
		let raw = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));

		Url::parse(&raw)
			.map_err(|source| ConfigError::InvalidEndpointPath { path: path.to_owned(), source })
	}
}
#[cfg(feature = "reqwest")]
impl Gateway<ReqwestHttpClient> {
	/// Creates a gateway backed by the default cookie-enabled reqwest
	/// transport, so callers do not need to pass HTTP handles explicitly.
	pub fn new(session: Arc<dyn SessionStore>, base_url: Url) -> Self {
		Self::with_http_client(session, base_url, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("base_url", &self.base_url.as_str())
			.field("refresh_path", &self.refresh_path)
			.field("timeout", &self.timeout)
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::session::MemorySessionStore;

	fn gateway(base: &str) -> Gateway<crate::http::ReqwestHttpClient> {
		Gateway::new(
			Arc::new(MemorySessionStore::default()),
			Url::parse(base).expect("Base URL fixture should parse."),
		)
	}

	#[test]
	fn endpoint_resolution_preserves_the_base_path_prefix() {
		let gateway = gateway("http://localhost:5000/api");

		assert_eq!(
			gateway.endpoint_url("/tasks").expect("Task path should resolve.").as_str(),
			"http://localhost:5000/api/tasks",
		);
		assert_eq!(
			gateway
				.endpoint_url("/auth/refresh-token")
				.expect("Refresh path should resolve.")
				.as_str(),
			"http://localhost:5000/api/auth/refresh-token",
		);
	}

	#[test]
	fn endpoint_resolution_tolerates_a_trailing_base_slash() {
		let gateway = gateway("http://localhost:5000/api/");

		assert_eq!(
			gateway.endpoint_url("/tasks").expect("Task path should resolve.").as_str(),
			"http://localhost:5000/api/tasks",
		);
	}

	#[test]
	fn non_positive_timeouts_are_rejected() {
		let err = gateway("http://localhost:5000/api")
			.with_timeout(Duration::ZERO)
			.expect_err("Zero timeout should be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::NonPositiveTimeout)));
	}

	#[test]
	fn descriptors_build_with_body_and_auth_flags() {
		let descriptor = RequestDescriptor::post("/auth/login")
			.json(&serde_json::json!({ "email": "a@b.c", "password": "pw" }))
			.expect("Login body should serialize.")
			.skip_auth();

		assert_eq!(descriptor.method, Method::Post);
		assert!(descriptor.skip_auth);
		assert!(descriptor.body.is_some());
	}
}
