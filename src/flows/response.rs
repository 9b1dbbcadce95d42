//! Parsing of form-encoded token endpoint replies.

// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, Secret, UserId},
	error::CredentialsError,
};

const HTTP_OK: u16 = 200;
const OAUTH_TOKEN: &str = "oauth_token";
const OAUTH_TOKEN_SECRET: &str = "oauth_token_secret";
const OAUTH_CALLBACK_CONFIRMED: &str = "oauth_callback_confirmed";

/// Why a token endpoint reply was not usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum ExtractError {
	/// The provider answered with a non-200 status.
	#[error("unexpected HTTP status {0}")]
	UnexpectedStatus(u16),
	/// A mandatory field was absent from the body.
	#[error("response is missing `{0}`")]
	MissingField(&'static str),
	/// A mandatory field was present but empty.
	#[error("response field `{0}` is empty")]
	EmptyField(&'static str),
}

/// Temporary credentials returned by the request-token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestToken {
	/// `oauth_token`, sent to the authorize endpoint.
	pub token: String,
	/// `oauth_token_secret`.
	pub secret: Secret,
	/// `oauth_callback_confirmed`, when the provider echoed it.
	pub callback_confirmed: Option<bool>,
}

/// Token credentials returned by the access-token endpoint.
///
/// Every field of the reply is preserved as a string, including provider extras such as
/// `screen_name`, `user_id`, and `x_auth_expires`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessTokenResponse {
	fields: BTreeMap<String, String>,
}
impl AccessTokenResponse {
	/// Access token (`oauth_token`).
	pub fn token(&self) -> &str {
		self.get(OAUTH_TOKEN).unwrap_or_default()
	}

	/// Access token secret (`oauth_token_secret`). Callers must avoid logging it.
	pub fn token_secret(&self) -> &str {
		self.get(OAUTH_TOKEN_SECRET).unwrap_or_default()
	}

	/// Provider `screen_name`, if present.
	pub fn screen_name(&self) -> Option<&str> {
		self.get("screen_name")
	}

	/// Provider `user_id`, if present.
	pub fn user_id(&self) -> Option<&str> {
		self.get("user_id")
	}

	/// Looks up any field of the reply.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.fields.get(key).map(String::as_str)
	}

	/// All fields of the reply.
	pub fn fields(&self) -> &BTreeMap<String, String> {
		&self.fields
	}

	/// Consumes the reply and returns its fields.
	pub fn into_fields(self) -> BTreeMap<String, String> {
		self.fields
	}

	/// Builds [`ClientCredentials`] from the reply.
	///
	/// The reply's `user_id` wins; `fallback` is used when the provider omitted it or sent it
	/// blank. A non-blank `user_id` that is not a valid identifier (such as `0`) is an error even
	/// when a fallback is given.
	pub fn to_client_credentials(
		&self,
		fallback: Option<UserId>,
	) -> Result<ClientCredentials, CredentialsError> {
		let reported = self.user_id().filter(|raw| !raw.trim().is_empty());
		let user_id = match (reported, fallback) {
			(Some(raw), _) => UserId::parse(raw)?,
			(None, Some(id)) => id,
			(None, None) => return Err(CredentialsError::InvalidUserId),
		};

		ClientCredentials::new(user_id, self.token(), self.token_secret())
	}
}
impl Debug for AccessTokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut map = f.debug_map();

		for (key, value) in &self.fields {
			if key == OAUTH_TOKEN_SECRET {
				map.entry(key, &"<redacted>");
			} else {
				map.entry(key, value);
			}
		}

		map.finish()
	}
}

/// Parses a request-token reply into temporary credentials.
pub fn extract_request_token(status: u16, body: &str) -> Result<RequestToken, ExtractError> {
	let mut fields = parse_reply(status, body)?;
	let token = take_required(&mut fields, OAUTH_TOKEN)?;
	let secret = take_required(&mut fields, OAUTH_TOKEN_SECRET)?;
	let callback_confirmed = fields.get(OAUTH_CALLBACK_CONFIRMED).map(|value| value == "true");

	Ok(RequestToken { token, secret: Secret::new(secret), callback_confirmed })
}

/// Parses an access-token reply, keeping every field.
///
/// Only `oauth_token` and `oauth_token_secret` are mandatory; missing identity fields do not
/// fail the exchange.
pub fn extract_access_token(status: u16, body: &str) -> Result<AccessTokenResponse, ExtractError> {
	let fields = parse_reply(status, body)?;

	for key in [OAUTH_TOKEN, OAUTH_TOKEN_SECRET] {
		match fields.get(key) {
			None => return Err(ExtractError::MissingField(key)),
			Some(value) if value.is_empty() => return Err(ExtractError::EmptyField(key)),
			Some(_) => {},
		}
	}

	Ok(AccessTokenResponse { fields })
}

fn parse_reply(status: u16, body: &str) -> Result<BTreeMap<String, String>, ExtractError> {
	if status != HTTP_OK {
		return Err(ExtractError::UnexpectedStatus(status));
	}

	let mut fields = BTreeMap::new();

	// First occurrence wins on duplicate keys.
	for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
		fields.entry(key.into_owned()).or_insert_with(|| value.into_owned());
	}

	Ok(fields)
}

fn take_required(
	fields: &mut BTreeMap<String, String>,
	key: &'static str,
) -> Result<String, ExtractError> {
	match fields.remove(key) {
		None => Err(ExtractError::MissingField(key)),
		Some(value) if value.is_empty() => Err(ExtractError::EmptyField(key)),
		Some(value) => Ok(value),
	}
}
