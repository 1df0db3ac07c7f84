//! Dispatch chain for one outbound call: credential attachment, status
//! interpretation, and handoff to the refresh protocol on 401.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::{self, Envelope},
	error::ApiError,
	gateway::{Gateway, RequestDescriptor},
	http::{ApiHttpClient, PreparedRequest, RawResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::BearerToken,
};

impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Sends a request through the gateway chain, returning the decoded
	/// envelope on success.
	///
	/// A `401` outcome is recovered transparently at most once per call:
	/// silent refresh, then a single retry with the rotated token. Every other
	/// failure status is classified, mirrored to the notifier, and surfaced
	/// unchanged.
	pub async fn send<T>(&self, request: RequestDescriptor) -> Result<Envelope<T>>
	where
		T: DeserializeOwned,
	{
		const KIND: CallKind = CallKind::Dispatch;

		let span = CallSpan::new(KIND, "send");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(async move { self.dispatch(request).await }).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	async fn dispatch<T>(&self, request: RequestDescriptor) -> Result<Envelope<T>>
	where
		T: DeserializeOwned,
	{
		self.metrics.record_attempt();

		let url = self.endpoint_url(&request.path)?;
		// The session may hold no token yet; the call is still issued without
		// an Authorization header and the server decides its fate.
		let bearer = if request.skip_auth { None } else { self.session.snapshot().token };
		let response = self.issue(&request, &url, bearer.clone()).await?;

		if response.is_success() {
			return Ok(api::decode_json(&response.body, response.status)?);
		}
		if response.status == 401 {
			return self.recover_unauthorized(&request, &url, bearer).await;
		}

		Err(self.surface(ApiError::from_status(
			response.status,
			api::failure_message(&response.body),
		)))
	}

	pub(crate) async fn issue(
		&self,
		request: &RequestDescriptor,
		url: &Url,
		bearer: Option<BearerToken>,
	) -> Result<RawResponse> {
		let prepared = PreparedRequest {
			method: request.method,
			url: url.clone(),
			bearer,
			body: request.body.clone(),
			timeout: self.timeout,
		};

		Ok(self.http_client.execute(prepared).await?)
	}

	/// Mirrors a classified failure to the notifier before surfacing it.
	pub(crate) fn surface(&self, error: ApiError) -> Error {
		self.notifier.failure(error.category(), &error.to_string());

		error.into()
	}
}
