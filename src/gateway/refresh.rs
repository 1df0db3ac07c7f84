//! One-shot session refresh and retry protocol.
//!
//! A call that fails with `401` attempts exactly one silent refresh against
//! the fixed refresh endpoint and, when that yields a new bearer token while a
//! user record is still present, re-issues the original call once. Any failure
//! along the way clears the session and surfaces
//! [`ApiError::SessionExpired`] — never a silent success, never a second
//! refresh. Concurrent failing calls coalesce behind a single in-flight
//! refresh: whichever acquires the guard first rotates the token, and the
//! waiters detect the rotation and go straight to their retries.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::{self, Envelope},
	error::{ApiError, FailureCategory},
	gateway::{Gateway, RequestDescriptor},
	http::{ApiHttpClient, Method, PreparedRequest},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::BearerToken,
};

const SESSION_EXPIRED: &str = "Session expired. Please login again.";
const USER_MISSING: &str = "User information missing. Please login again.";
const REFRESH_UNREACHABLE: &str = "Authentication failed. Please login again.";

/// Payload carried by a successful refresh response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshData {
	access_token: String,
}

impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	pub(crate) async fn recover_unauthorized<T>(
		&self,
		request: &RequestDescriptor,
		url: &Url,
		stale: Option<BearerToken>,
	) -> Result<Envelope<T>>
	where
		T: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "recover_unauthorized");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record_refresh_attempt();

		let bearer = match span.instrument(self.refreshed_bearer(stale)).await {
			Ok(bearer) => {
				obs::record_call_outcome(KIND, CallOutcome::Success);

				bearer
			},
			Err(err) => {
				obs::record_call_outcome(KIND, CallOutcome::Failure);
				self.metrics.record_refresh_failure();

				return Err(err);
			},
		};

		self.retry(request, url, bearer).await
	}

	/// Produces a bearer token usable for the retry, refreshing at most once.
	async fn refreshed_bearer(&self, stale: Option<BearerToken>) -> Result<BearerToken> {
		let _singleflight = self.refresh_guard.lock().await;

		// A call that carried a bearer may find another call already rotated it
		// while this one waited on the guard; reuse the rotation instead of
		// refreshing again. Calls that carried no bearer always refresh.
		if let Some(stale) = &stale
			&& let Some(current) = self.session.snapshot().token
			&& *stale != current
		{
			self.metrics.record_refresh_coalesced();

			return Ok(current);
		}

		// The continuation credential (HTTP-only cookie) rides along inside
		// the transport; this call carries neither bearer nor body.
		let url = self.endpoint_url(&self.refresh_path)?;
		let prepared = PreparedRequest {
			method: Method::Post,
			url,
			bearer: None,
			body: None,
			timeout: self.timeout,
		};
		let response = match self.http_client.execute(prepared).await {
			Ok(response) => response,
			Err(_) => return Err(self.expire_session(REFRESH_UNREACHABLE)),
		};

		if !response.is_success() {
			return Err(self.expire_session(SESSION_EXPIRED));
		}

		// An undecodable body is treated like an unreachable endpoint rather
		// than a rejected refresh.
		let envelope: Envelope<RefreshData> =
			match api::decode_json(&response.body, response.status) {
				Ok(envelope) => envelope,
				Err(_) => return Err(self.expire_session(REFRESH_UNREACHABLE)),
			};
		let token = match envelope.success.then_some(envelope.data).flatten() {
			Some(data) => BearerToken::new(data.access_token),
			None => return Err(self.expire_session(SESSION_EXPIRED)),
		};

		// The swap is refused when the user record vanished in the meantime;
		// installing an orphan token would leave a half-authenticated session.
		if !self.session.replace_token(token.clone()) {
			return Err(self.expire_session(USER_MISSING));
		}

		Ok(token)
	}

	async fn retry<T>(
		&self,
		request: &RequestDescriptor,
		url: &Url,
		bearer: BearerToken,
	) -> Result<Envelope<T>>
	where
		T: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Retry;

		let span = CallSpan::new(KIND, "retry");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record_retry();

		// A call flagged as unauthenticated stays unauthenticated on retry.
		let bearer = (!request.skip_auth).then_some(bearer);
		let result = span.instrument(self.issue(request, url, bearer)).await;
		let response = match result {
			Ok(response) => response,
			Err(err) => {
				obs::record_call_outcome(KIND, CallOutcome::Failure);

				return Err(err);
			},
		};
		let outcome = if response.is_success() {
			api::decode_json(&response.body, response.status).map_err(Error::from)
		} else if response.status == 401 {
			// The rotated token was rejected too; a second refresh is never
			// attempted.
			Err(self.expire_session(SESSION_EXPIRED))
		} else {
			Err(self.surface(ApiError::from_status(
				response.status,
				api::failure_message(&response.body),
			)))
		};

		match &outcome {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		outcome
	}

	/// Forces logout and surfaces the expiry to the caller and notifier.
	fn expire_session(&self, message: &str) -> Error {
		self.metrics.record_session_clear();
		self.session.clear();
		self.notifier.failure(FailureCategory::SessionExpired, message);

		ApiError::SessionExpired.into()
	}
}
