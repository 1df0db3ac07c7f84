//! Transport primitives for TaskWheel API calls.
//!
//! The module exposes [`ApiHttpClient`] alongside [`PreparedRequest`] and
//! [`RawResponse`] so downstream crates can integrate custom HTTP clients. The
//! gateway hands a fully-resolved request (URL, method, bearer credential, JSON
//! body, timeout) to the transport and interprets the raw status + body itself,
//! so implementations never need to understand the API's response envelope.

// self
use crate::{_prelude::*, error::TransportError, session::BearerToken};

/// Boxed `Send` future returned by [`ApiHttpClient::execute`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing TaskWheel API calls.
///
/// The trait is the gateway's only dependency on an HTTP stack. Implementations
/// must be `Send + Sync + 'static` so a single transport can be shared across
/// gateway clones, and the returned futures must be `Send` so callers can hop
/// executors freely. Ambient credentials (the refresh cookie) are the
/// transport's responsibility; the default reqwest transport keeps a cookie
/// store enabled for exactly that purpose.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes a prepared request, resolving to the raw status and body.
	fn execute(&self, request: PreparedRequest) -> TransportFuture<'_>;
}

/// HTTP methods used by the TaskWheel API surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// HTTP GET.
	Get,
	/// HTTP POST.
	Post,
	/// HTTP PUT.
	Put,
	/// HTTP PATCH.
	Patch,
	/// HTTP DELETE.
	Delete,
}
impl Method {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully-resolved request handed from the gateway to the transport.
///
/// Additional fields may be added in future releases, so downstream transports
/// should construct values using field names instead of struct update syntax.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
	/// HTTP method to issue.
	pub method: Method,
	/// Absolute endpoint URL.
	pub url: Url,
	/// Bearer credential to attach as the `Authorization` header, if any.
	pub bearer: Option<BearerToken>,
	/// JSON body to send, if any.
	pub body: Option<serde_json::Value>,
	/// Per-request timeout the transport must enforce.
	pub timeout: Duration,
}

/// Raw response surfaced by the transport before the gateway interprets it.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns `true` for 2xx statuses.
	pub const fn is_success(&self) -> bool {
		matches!(self.status, 200..=299)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. The default construction enables the cookie store because the refresh
/// endpoint authenticates through an HTTP-only cookie the server manages;
/// custom [`ReqwestClient`] instances should do the same or silent refresh will
/// always fail.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl Default for ReqwestHttpClient {
	fn default() -> Self {
		// Builder failure here means the TLS backend could not initialize; fall
		// back to the stock client so construction stays infallible.
		Self(ReqwestClient::builder().cookie_store(true).build().unwrap_or_default())
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl std::ops::Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn execute(&self, request: PreparedRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Patch => reqwest::Method::PATCH,
				Method::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url);

			if let Some(bearer) = &request.bearer {
				builder = builder.bearer_auth(bearer.expose());
			}
			if let Some(body) = &request.body {
				builder = builder.json(body);
			}
			// The gateway validates positivity at build time.
			if let Ok(timeout) = std::time::Duration::try_from(request.timeout) {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn methods_render_their_wire_names() {
		assert_eq!(Method::Get.as_str(), "GET");
		assert_eq!(Method::Patch.to_string(), "PATCH");
	}

	#[test]
	fn raw_response_success_covers_the_2xx_range() {
		assert!(RawResponse { status: 200, body: Vec::new() }.is_success());
		assert!(RawResponse { status: 299, body: Vec::new() }.is_success());
		assert!(!RawResponse { status: 301, body: Vec::new() }.is_success());
		assert!(!RawResponse { status: 401, body: Vec::new() }.is_success());
	}

	#[test]
	fn prepared_request_debug_redacts_the_bearer() {
		let request = PreparedRequest {
			method: Method::Get,
			url: Url::parse("https://api.taskwheel.test/api/tasks")
				.expect("Fixture URL should parse."),
			bearer: Some(BearerToken::new("top-secret")),
			body: None,
			timeout: Duration::seconds(30),
		};
		let rendered = format!("{request:?}");

		assert!(!rendered.contains("top-secret"));
		assert!(rendered.contains("<redacted>"));
	}
}
