//! Crate-level error types shared across signing, credentials, providers, and flows.

// std
use std::path::PathBuf;
// self
use crate::{_prelude::*, flows::ExtractError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Credential construction, environment, or file failure.
	#[error(transparent)]
	Credentials(#[from] CredentialsError),
	/// Signing primitive failure; the request must not be sent.
	#[error(transparent)]
	Crypto(#[from] CryptoError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Provider rejected or garbled a token exchange.
	#[error("Authorization failed, please retry: {0}.")]
	Rejected(#[from] ExtractError),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Provider descriptor is missing an endpoint.
	#[error("Provider descriptor is missing the {endpoint} endpoint.")]
	MissingEndpoint {
		/// Which endpoint is absent.
		endpoint: &'static str,
	},
	/// Provider descriptor has an empty name.
	#[error("Provider name cannot be empty.")]
	EmptyProviderName,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// A request URL could not be parsed.
	#[error("Request URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A request URL cannot serve as a signature base URI (no host).
	#[error("URL `{url}` cannot be used as a signature base URI.")]
	UnsupportedBaseUrl {
		/// URL that failed normalization.
		url: String,
	},
}
impl From<url::ParseError> for ConfigError {
	fn from(source: url::ParseError) -> Self {
		Self::InvalidUrl { source }
	}
}

/// Credential validation and loading failures. Messages never include secret material.
#[derive(Debug, ThisError)]
pub enum CredentialsError {
	/// A required credential field was empty.
	#[error("Credential field `{field}` cannot be empty.")]
	EmptyField {
		/// Field name.
		field: &'static str,
	},
	/// Numeric user identifiers must be positive.
	#[error("User identifier must be a positive integer or a non-empty string.")]
	InvalidUserId,
	/// A required environment variable is not set.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Credential file could not be read or written.
	#[error("Credential file {} could not be accessed.", path.display())]
	Io {
		/// File path involved in the failure.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Credential JSON did not match the expected shape.
	#[error("Credential JSON is malformed at `{path}`.")]
	Parse {
		/// JSON path of the offending value.
		path: String,
		/// Underlying deserialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Credentials could not be serialized.
	#[error("Credentials could not be serialized.")]
	Serialize(#[source] serde_json::Error),
}
impl From<serde_path_to_error::Error<serde_json::Error>> for CredentialsError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}

/// Signing primitive failures.
#[derive(Debug, ThisError)]
pub enum CryptoError {
	/// HMAC-SHA1 refused the derived signing key.
	#[error("HMAC-SHA1 rejected the signing key.")]
	InvalidKey(#[from] hmac::digest::InvalidLength),
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
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
		Self::network(e)
	}
}
