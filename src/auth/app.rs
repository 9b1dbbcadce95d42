//! Consumer (application) credentials.

// self
use crate::{
	_prelude::*,
	auth::{EnvSource, ProcessEnv, Secret, env},
	error::CredentialsError,
};

/// Environment variable holding the consumer key.
pub const APP_KEY_ENV: &str = "TWITTER_APP_KEY";
/// Environment variable holding the consumer secret.
pub const APP_SECRET_ENV: &str = "TWITTER_APP_SECRET";

/// Immutable OAuth consumer identity of the registered application.
///
/// Fields are private so a constructed value can never be mutated; equality and hashing cover
/// both the key and the secret.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AppCredentials {
	key: String,
	secret: Secret,
}
impl AppCredentials {
	/// Validates and builds a new consumer identity.
	pub fn new(
		key: impl Into<String>,
		secret: impl Into<String>,
	) -> Result<Self, CredentialsError> {
		let key = key.into();
		let secret = Secret::new(secret);

		if key.is_empty() {
			return Err(CredentialsError::EmptyField { field: "key" });
		}
		if secret.is_empty() {
			return Err(CredentialsError::EmptyField { field: "secret" });
		}

		Ok(Self { key, secret })
	}

	/// Loads the consumer identity from `TWITTER_APP_KEY` / `TWITTER_APP_SECRET` in `source`.
	pub fn from_env(source: &impl EnvSource) -> Result<Self, CredentialsError> {
		Self::new(env::require(source, APP_KEY_ENV)?, env::require(source, APP_SECRET_ENV)?)
	}

	/// Loads the consumer identity from the process environment.
	pub fn load_from_env() -> Result<Self, CredentialsError> {
		Self::from_env(&ProcessEnv)
	}

	/// Consumer key sent as `oauth_consumer_key`.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Consumer secret; only ever used to derive signing keys.
	pub fn secret(&self) -> &Secret {
		&self.secret
	}
}
impl Debug for AppCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppCredentials")
			.field("key", &self.key)
			.field("secret", &self.secret)
			.finish()
	}
}
impl Display for AppCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "AppCredentials({}, {})", self.key, self.secret)
	}
}
