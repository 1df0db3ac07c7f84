//! Typed TaskWheel API surface: the response envelope and endpoint operations.
//!
//! Endpoint operations live in per-feature modules (`auth`, `task`, `spin`) as
//! `impl` blocks on [`Gateway`](crate::gateway::Gateway), so each module only
//! concerns itself with its own request/response shapes while the gateway owns
//! credentials, recovery, and error classification.

pub mod auth;
pub mod spin;
pub mod task;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::DecodeError};

/// Standard response envelope wrapping every TaskWheel API payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
	/// Whether the API reports the operation as successful.
	pub success: bool,
	/// Human-readable message accompanying the response.
	#[serde(default)]
	pub message: String,
	/// Operation payload, when the endpoint returns one.
	pub data: Option<T>,
	/// Pagination metadata, when the endpoint returns a page.
	#[serde(default)]
	pub meta: Option<Meta>,
}
impl<T> Envelope<T> {
	/// Extracts the payload, failing when the envelope carried none.
	pub fn into_data(self, endpoint: &'static str) -> Result<T, DecodeError> {
		self.data.ok_or(DecodeError::MissingData { endpoint })
	}
}

/// Pagination metadata attached to list responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
	/// Page index.
	pub page: u64,
	/// Page size.
	pub limit: u64,
	/// Total matching records.
	pub total: u64,
	/// Total page count.
	pub total_page: u64,
}

/// Failure payload shape produced by the API.
///
/// Parsed leniently at the boundary; failures that carry no body, or a body in
/// another shape, fall back to the category's stock message.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailurePayload {
	/// Human-readable failure message.
	pub message: String,
	/// Status code echoed inside the payload, when present.
	#[serde(default)]
	pub status_code: Option<u16>,
}

/// Extracts the failure message from an error body, if one can be decoded.
pub(crate) fn failure_message(body: &[u8]) -> Option<String> {
	serde_json::from_slice::<FailurePayload>(body).ok().map(|payload| payload.message)
}

/// Decodes a JSON payload, reporting the failing path on mismatch.
pub(crate) fn decode_json<T>(body: &[u8], status: u16) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::Envelope { source, status })
}
