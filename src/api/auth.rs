//! Authentication, password, and profile operations.
//!
//! Login and register establish the session on success; logout is local only
//! (the API exposes no logout endpoint, the continuation cookie simply stops
//! being honored once the server rotates it out).

// self
use crate::{
	_prelude::*,
	api::Envelope,
	gateway::{Gateway, RequestDescriptor},
	http::ApiHttpClient,
	session::{BearerToken, UserProfile},
};

/// Credentials submitted to `POST /auth/login`.
#[derive(Clone, Debug, Serialize)]
pub struct LoginCredentials {
	/// Account email address.
	pub email: String,
	/// Account password.
	pub password: String,
}

/// Payload submitted to `POST /auth/register`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
	/// Display name.
	pub name: String,
	/// Account email address.
	pub email: String,
	/// Chosen password.
	pub password: String,
	/// Password confirmation; the API validates the match.
	pub confirm_password: String,
}

/// Payload submitted to `POST /auth/reset-password`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
	/// Account email address.
	pub email: String,
	/// Replacement password.
	pub new_password: String,
	/// Password confirmation.
	pub confirm_password: String,
	/// Single-use reset token from the forgot-password email.
	pub reset_token: String,
}

/// Payload submitted to `POST /auth/change-password`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
	/// Current password.
	pub old_password: String,
	/// Replacement password.
	pub new_password: String,
	/// Password confirmation.
	pub confirm_password: String,
}

/// Partial profile update submitted to `PUT /auth/profile`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileUpdate {
	/// Replacement display name, when changing it.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Replacement email address, when changing it.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}

/// Payload returned by login and register.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthData {
	user: UserProfile,
	access_token: String,
}

impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Signs in and establishes the session from the returned user + token.
	pub async fn login(&self, credentials: &LoginCredentials) -> Result<UserProfile> {
		let envelope: Envelope<AuthData> = self
			.send(RequestDescriptor::post("/auth/login").json(credentials)?.skip_auth())
			.await?;
		let data = envelope.into_data("login")?;

		self.session.establish(
			data.user.clone(),
			Some(data.user.email.clone()),
			BearerToken::new(data.access_token),
		);

		Ok(data.user)
	}

	/// Creates an account and establishes the session from the response.
	pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
		let envelope: Envelope<AuthData> = self
			.send(RequestDescriptor::post("/users/register").json(request)?.skip_auth())
			.await?;
		let data = envelope.into_data("register")?;

		self.session.establish(
			data.user.clone(),
			Some(data.user.email.clone()),
			BearerToken::new(data.access_token),
		);

		Ok(data.user)
	}

	/// Requests a password-reset email, returning the API's status message.
	pub async fn forgot_password(&self, email: impl Into<String>) -> Result<String> {
		let body = serde_json::json!({ "email": email.into() });
		let envelope: Envelope<serde_json::Value> = self
			.send(RequestDescriptor::post("/auth/forgot-password").json(&body)?.skip_auth())
			.await?;

		Ok(envelope.message)
	}

	/// Completes a password reset with the emailed token.
	pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<String> {
		let envelope: Envelope<serde_json::Value> = self
			.send(RequestDescriptor::post("/auth/reset-password").json(request)?.skip_auth())
			.await?;

		Ok(envelope.message)
	}

	/// Changes the signed-in user's password.
	pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<String> {
		let envelope: Envelope<serde_json::Value> =
			self.send(RequestDescriptor::post("/auth/change-password").json(request)?).await?;

		Ok(envelope.message)
	}

	/// Fetches the signed-in user's profile.
	pub async fn profile(&self) -> Result<UserProfile> {
		let envelope: Envelope<UserProfile> =
			self.send(RequestDescriptor::get("/auth/profile")).await?;

		envelope.into_data("profile").map_err(Error::from)
	}

	/// Fetches the signed-in user's profile from the users surface.
	///
	/// The API serves the profile at two paths; this one backs dashboard
	/// views while [`profile`](Self::profile) backs the settings screen.
	pub async fn user_profile(&self) -> Result<UserProfile> {
		let envelope: Envelope<UserProfile> =
			self.send(RequestDescriptor::get("/users/profile")).await?;

		envelope.into_data("user_profile").map_err(Error::from)
	}

	/// Updates the profile and mirrors the result into the session.
	pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
		let envelope: Envelope<UserProfile> =
			self.send(RequestDescriptor::put("/auth/profile").json(update)?).await?;
		let profile = envelope.into_data("update_profile")?;

		self.session.update_user(profile.clone());

		Ok(profile)
	}

	/// Signs out locally by destroying the session.
	pub fn logout(&self) {
		self.session.clear();
	}
}
