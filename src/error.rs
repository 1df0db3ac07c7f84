//! Client-level error types shared across the gateway, session, and endpoint layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// API responded with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// API responded with a payload that could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}

/// Configuration and request-construction failures raised locally.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Endpoint path could not be combined with the base origin into a URL.
	#[error("Endpoint path `{path}` does not form a valid URL.")]
	InvalidEndpointPath {
		/// Offending path fragment.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	InvalidBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Configured request timeout is zero or negative.
	#[error("Request timeout must be positive.")]
	NonPositiveTimeout,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The call exceeded the configured request timeout.
	#[error("Request timed out while calling the API.")]
	Timeout,
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e) }
	}
}

/// API failure taxonomy keyed on the response status code.
///
/// `401` never appears here directly; the gateway recovers it via the refresh
/// protocol and surfaces [`ApiError::SessionExpired`] when recovery fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ApiError {
	/// The API rejected the request as malformed (HTTP 400).
	#[error("{message}")]
	BadRequest {
		/// Message carried by the failure payload.
		message: String,
	},
	/// The session lacks permission for the resource (HTTP 403).
	#[error("{message}")]
	Forbidden {
		/// Message carried by the failure payload.
		message: String,
	},
	/// The resource does not exist (HTTP 404).
	#[error("{message}")]
	NotFound {
		/// Message carried by the failure payload.
		message: String,
	},
	/// The API failed internally (HTTP 500).
	#[error("{message}")]
	ServerError {
		/// Message carried by the failure payload.
		message: String,
	},
	/// The session could not be refreshed and has been cleared.
	#[error("Session expired. Please login again.")]
	SessionExpired,
	/// Status code with no dedicated category.
	#[error("{message}")]
	Unmapped {
		/// HTTP status code returned by the API.
		status: u16,
		/// Message carried by the failure payload.
		message: String,
	},
}
impl ApiError {
	/// Classifies a non-401 failure status, falling back to the category's
	/// stock message when the payload carried none.
	///
	/// Server faults never surface their payload message; whatever a 500
	/// carries is for operators, not users.
	pub fn from_status(status: u16, message: Option<String>) -> Self {
		let category = FailureCategory::from_status(status);
		let message = match status {
			500 => category.stock_message().to_owned(),
			_ => message.unwrap_or_else(|| category.stock_message().to_owned()),
		};

		match status {
			400 => Self::BadRequest { message },
			403 => Self::Forbidden { message },
			404 => Self::NotFound { message },
			500 => Self::ServerError { message },
			_ => Self::Unmapped { status, message },
		}
	}

	/// Returns the presentation category for this failure.
	pub fn category(&self) -> FailureCategory {
		match self {
			Self::BadRequest { .. } => FailureCategory::BadRequest,
			Self::Forbidden { .. } => FailureCategory::Forbidden,
			Self::NotFound { .. } => FailureCategory::NotFound,
			Self::ServerError { .. } => FailureCategory::ServerError,
			Self::SessionExpired => FailureCategory::SessionExpired,
			Self::Unmapped { .. } => FailureCategory::Unknown,
		}
	}

	/// Returns the originating HTTP status code, when one applies.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::BadRequest { .. } => Some(400),
			Self::Forbidden { .. } => Some(403),
			Self::NotFound { .. } => Some(404),
			Self::ServerError { .. } => Some(500),
			Self::SessionExpired => None,
			Self::Unmapped { status, .. } => Some(*status),
		}
	}
}

/// Human-readable failure category attached to surfaced API errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureCategory {
	/// HTTP 400.
	BadRequest,
	/// HTTP 403.
	Forbidden,
	/// HTTP 404.
	NotFound,
	/// HTTP 500.
	ServerError,
	/// Session refresh failed and the session was cleared.
	SessionExpired,
	/// Any other status code.
	Unknown,
}
impl FailureCategory {
	/// Maps a failure status code onto its presentation category.
	pub fn from_status(status: u16) -> Self {
		match status {
			400 => Self::BadRequest,
			403 => Self::Forbidden,
			404 => Self::NotFound,
			500 => Self::ServerError,
			_ => Self::Unknown,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::BadRequest => "bad_request",
			Self::Forbidden => "forbidden",
			Self::NotFound => "not_found",
			Self::ServerError => "server_error",
			Self::SessionExpired => "session_expired",
			Self::Unknown => "unknown",
		}
	}

	/// Returns the stock message shown when the payload carried none.
	pub const fn stock_message(self) -> &'static str {
		match self {
			Self::BadRequest => "Bad Request",
			Self::Forbidden => "Access Forbidden",
			Self::NotFound => "Resource not found",
			Self::ServerError => "Internal server error. Please try again later.",
			Self::SessionExpired => "Session expired. Please login again.",
			Self::Unknown => "An error occurred",
		}
	}
}
impl Display for FailureCategory {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Response-payload decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// The API returned JSON that does not match the response envelope.
	#[error("API returned a malformed response payload.")]
	Envelope {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code the payload arrived with.
		status: u16,
	},
	/// The envelope decoded but its `data` field was absent.
	#[error("API response for `{endpoint}` is missing its data payload.")]
	MissingData {
		/// Endpoint label for diagnostics.
		endpoint: &'static str,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_classification_covers_the_taxonomy() {
		assert_eq!(
			ApiError::from_status(400, Some("title required".into())),
			ApiError::BadRequest { message: "title required".into() },
		);
		assert_eq!(
			ApiError::from_status(403, None),
			ApiError::Forbidden { message: "Access Forbidden".into() },
		);
		assert_eq!(
			ApiError::from_status(404, None),
			ApiError::NotFound { message: "Resource not found".into() },
		);
		assert_eq!(
			ApiError::from_status(500, Some("stack trace".into())),
			ApiError::ServerError { message: "Internal server error. Please try again later.".into() },
			"A 500 payload message must never reach the user.",
		);
		assert_eq!(
			ApiError::from_status(418, None),
			ApiError::Unmapped { status: 418, message: "An error occurred".into() },
		);
	}

	#[test]
	fn server_error_prefers_stock_message_when_payload_is_silent() {
		let err = ApiError::from_status(500, None);

		assert_eq!(err.to_string(), "Internal server error. Please try again later.");
	}

	#[test]
	fn categories_expose_stable_labels() {
		assert_eq!(ApiError::SessionExpired.category().as_str(), "session_expired");
		assert_eq!(ApiError::from_status(404, None).category().as_str(), "not_found");
		assert_eq!(ApiError::from_status(400, None).status(), Some(400));
		assert_eq!(ApiError::SessionExpired.status(), None);
	}
}
