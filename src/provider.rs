//! Provider endpoint descriptors for the three-legged flow.
//!
//! A [`ProviderDescriptor`] names the provider and carries the three HTTPS endpoints the flow
//! talks to. Descriptors are validated once by [`ProviderDescriptorBuilder::build`] and are
//! immutable afterwards.

// self
use crate::{_prelude::*, error::ConfigError};

const TWITTER_REQUEST_TOKEN: &str = "https://api.twitter.com/oauth/request_token";
const TWITTER_AUTHENTICATE: &str = "https://api.twitter.com/oauth/authenticate";
const TWITTER_ACCESS_TOKEN: &str = "https://api.twitter.com/oauth/access_token";

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEndpoints {
	/// Temporary credential (request token) endpoint.
	pub request_token: Url,
	/// Resource-owner authorization endpoint users are redirected to.
	pub authorize: Url,
	/// Token credential (access token) endpoint.
	pub access_token: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderDescriptor {
	/// Human-readable provider name.
	pub name: String,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided name.
	pub fn builder(name: impl Into<String>) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(name)
	}

	/// Twitter's OAuth 1.0a endpoints.
	pub fn twitter() -> Result<Self, ConfigError> {
		Self::builder("twitter")
			.request_token_endpoint(Url::parse(TWITTER_REQUEST_TOKEN)?)
			.authorize_endpoint(Url::parse(TWITTER_AUTHENTICATE)?)
			.access_token_endpoint(Url::parse(TWITTER_ACCESS_TOKEN)?)
			.build()
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.name.trim().is_empty() {
			return Err(ConfigError::EmptyProviderName);
		}

		validate_endpoint("request_token", &self.endpoints.request_token)?;
		validate_endpoint("authorize", &self.endpoints.authorize)?;
		validate_endpoint("access_token", &self.endpoints.access_token)?;

		Ok(())
	}
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Name for the descriptor being constructed.
	pub name: String,
	/// Temporary credential endpoint.
	pub request_token_endpoint: Option<Url>,
	/// Authorization endpoint.
	pub authorize_endpoint: Option<Url>,
	/// Token credential endpoint.
	pub access_token_endpoint: Option<Url>,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			request_token_endpoint: None,
			authorize_endpoint: None,
			access_token_endpoint: None,
		}
	}

	/// Sets the temporary credential endpoint.
	pub fn request_token_endpoint(mut self, url: Url) -> Self {
		self.request_token_endpoint = Some(url);

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorize_endpoint(mut self, url: Url) -> Self {
		self.authorize_endpoint = Some(url);

		self
	}

	/// Sets the token credential endpoint.
	pub fn access_token_endpoint(mut self, url: Url) -> Self {
		self.access_token_endpoint = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ConfigError> {
		let request_token = self
			.request_token_endpoint
			.ok_or(ConfigError::MissingEndpoint { endpoint: "request_token" })?;
		let authorize =
			self.authorize_endpoint.ok_or(ConfigError::MissingEndpoint { endpoint: "authorize" })?;
		let access_token = self
			.access_token_endpoint
			.ok_or(ConfigError::MissingEndpoint { endpoint: "access_token" })?;
		let descriptor = ProviderDescriptor {
			name: self.name,
			endpoints: ProviderEndpoints { request_token, authorize, access_token },
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() != "https" {
		Err(ConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
