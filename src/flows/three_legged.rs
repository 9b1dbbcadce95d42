//! Request builders and async drivers for the three-legged exchange.

// self
use crate::{
	_prelude::*,
	auth::AppCredentials,
	encode,
	error::ConfigError,
	flows::{
		AccessTokenResponse, ExtractError, RequestToken, extract_access_token,
		extract_request_token,
	},
	http::OAuthHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::ProviderDescriptor,
	request::{HttpMethod, SignedRequest},
	sign::{OAuthOverrides, OAuthParams, OAuthSigner, Params},
};

/// Drives the three-legged flow for one consumer against one provider.
///
/// Builders return [`SignedRequest`] descriptors and never perform I/O; the `fetch_*` helpers
/// additionally execute them through an [`OAuthHttpClient`].
#[derive(Clone, Debug)]
pub struct ThreeLeggedFlow {
	provider: ProviderDescriptor,
	app: AppCredentials,
}
impl ThreeLeggedFlow {
	/// Creates a flow for `app` against `provider`.
	pub fn new(provider: ProviderDescriptor, app: AppCredentials) -> Self {
		Self { provider, app }
	}

	/// Creates a flow against Twitter's endpoints.
	pub fn twitter(app: AppCredentials) -> Result<Self, ConfigError> {
		Ok(Self::new(ProviderDescriptor::twitter()?, app))
	}

	/// Provider descriptor in use.
	pub fn provider(&self) -> &ProviderDescriptor {
		&self.provider
	}

	/// Consumer credentials in use.
	pub fn app(&self) -> &AppCredentials {
		&self.app
	}

	/// Builds the signed `POST` to the request-token endpoint carrying `oauth_callback`.
	pub fn obtain_request_token(
		&self,
		callback: &str,
		overrides: &OAuthOverrides,
	) -> Result<SignedRequest> {
		let signer = OAuthSigner::new(&self.app);
		let oauth = signer.oauth_params(overrides).with_callback(callback);

		self.sign_post(&signer, self.provider.endpoints.request_token.clone(), &oauth)
	}

	/// Authorize URL the end user must visit, with the request token as `oauth_token`.
	pub fn redirect_url(&self, request_token: &str) -> Url {
		let mut url = self.provider.endpoints.authorize.clone();
		let param = format!("oauth_token={}", encode::quote_str(request_token));
		let query = match url.query().filter(|q| !q.is_empty()) {
			Some(existing) => format!("{existing}&{param}"),
			None => param,
		};

		url.set_query(Some(&query));

		url
	}

	/// Builds the signed `POST` to the access-token endpoint carrying `oauth_verifier`.
	///
	/// Signs with the consumer secret only; use
	/// [`obtain_access_token_with_secret`](Self::obtain_access_token_with_secret) when the
	/// provider expects the temporary credential secret in the signing key.
	pub fn obtain_access_token(
		&self,
		request_token: &str,
		verifier: &str,
		overrides: &OAuthOverrides,
	) -> Result<SignedRequest> {
		let signer = OAuthSigner::new(&self.app).with_token(request_token, None);
		let oauth = signer.oauth_params(overrides).with_verifier(verifier);

		self.sign_post(&signer, self.provider.endpoints.access_token.clone(), &oauth)
	}

	/// Like [`obtain_access_token`](Self::obtain_access_token) but folds the temporary
	/// credential secret into the signing key.
	pub fn obtain_access_token_with_secret(
		&self,
		request_token: &RequestToken,
		verifier: &str,
		overrides: &OAuthOverrides,
	) -> Result<SignedRequest> {
		let signer = OAuthSigner::new(&self.app)
			.with_token(&request_token.token, Some(&request_token.secret));
		let oauth = signer.oauth_params(overrides).with_verifier(verifier);

		self.sign_post(&signer, self.provider.endpoints.access_token.clone(), &oauth)
	}

	/// Requests temporary credentials through `client`.
	///
	/// A rejected or malformed reply surfaces as [`Error::Rejected`].
	pub async fn fetch_request_token<C>(&self, client: &C, callback: &str) -> Result<RequestToken>
	where
		C: ?Sized + OAuthHttpClient,
	{
		const KIND: FlowKind = FlowKind::RequestToken;

		let span = FlowSpan::new(KIND, "fetch_request_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = self.obtain_request_token(callback, &OAuthOverrides::default())?;
				let response = client.execute(&request).await?;

				extract_request_token(response.status, &response.body)
					.inspect_err(|e| obs::log_rejection(KIND, e))
					.map_err(Error::from)
			})
			.await;

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}

	/// Exchanges the verifier for token credentials through `client`.
	///
	/// A rejected or malformed reply surfaces as [`Error::Rejected`].
	pub async fn fetch_access_token<C>(
		&self,
		client: &C,
		request_token: &RequestToken,
		verifier: &str,
	) -> Result<AccessTokenResponse>
	where
		C: ?Sized + OAuthHttpClient,
	{
		const KIND: FlowKind = FlowKind::AccessToken;

		let span = FlowSpan::new(KIND, "fetch_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = self.obtain_access_token_with_secret(
					request_token,
					verifier,
					&OAuthOverrides::default(),
				)?;
				let response = client.execute(&request).await?;

				extract_access_token(response.status, &response.body)
					.inspect_err(|e: &ExtractError| obs::log_rejection(KIND, e))
					.map_err(Error::from)
			})
			.await;

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}

	fn sign_post(
		&self,
		signer: &OAuthSigner<'_>,
		url: Url,
		oauth: &OAuthParams,
	) -> Result<SignedRequest> {
		let params = Params::new();
		let signature = signer.sign(HttpMethod::Post.as_str(), &url, &params, oauth)?;

		Ok(SignedRequest::from_parts(HttpMethod::Post, url, &params, signature.header))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::sign::AUTHORIZATION;

	fn flow() -> ThreeLeggedFlow {
		let app = AppCredentials::new(
			"cChZNFj6T5R0TigYB9yd1w",
			"L8qq9PZyRg6ieKGEKhZolGC0vJWLw8iEJ88DRdyOg",
		)
		.expect("Fixture app credentials should be valid.");

		ThreeLeggedFlow::twitter(app).expect("Twitter flow should build.")
	}

	#[test]
	fn redirect_url_encodes_token() {
		assert_eq!(
			flow().redirect_url("hello/world").as_str(),
			"https://api.twitter.com/oauth/authenticate?oauth_token=hello%2Fworld"
		);
	}

	#[test]
	fn request_token_call_signs_callback() {
		let request = flow()
			.obtain_request_token(
				"http://localhost/sign-in-with-twitter/",
				&OAuthOverrides::default()
					.nonce("ea9ec8429b68d6b77cd5600adbbb0456")
					.timestamp(1318467427),
			)
			.expect("Request-token call should sign.");
		let header = request.authorization.as_str();

		assert_eq!(request.method, HttpMethod::Post);
		assert_eq!(request.url.as_str(), "https://api.twitter.com/oauth/request_token");
		assert!(request.body.is_none());
		assert!(header.starts_with(
			"OAuth oauth_callback=\"http%3A%2F%2Flocalhost%2Fsign-in-with-twitter%2F\", \
			 oauth_consumer_key=\"cChZNFj6T5R0TigYB9yd1w\", \
			 oauth_nonce=\"ea9ec8429b68d6b77cd5600adbbb0456\", "
		));
		assert!(!header.contains("oauth_token="));
		assert_eq!(request.headers()[0].0, AUTHORIZATION);
	}

	#[test]
	fn access_token_call_carries_token_and_verifier() {
		let flow = flow();
		let overrides = OAuthOverrides::default().nonce("n").timestamp(1);
		let request = flow
			.obtain_access_token(
				"NPcudxy0yU5T3tBzho7iCotZ3cnetKwcTIRlX0iwRl0",
				"uw7NjWHT6OJ1MpJOXsHfNxoAhPKpgI8BlYDhxEjIBY",
				&overrides,
			)
			.expect("Access-token call should sign.");
		let header = request.authorization.as_str();

		assert_eq!(request.url.as_str(), "https://api.twitter.com/oauth/access_token");
		assert!(header.contains("oauth_token=\"NPcudxy0yU5T3tBzho7iCotZ3cnetKwcTIRlX0iwRl0\""));
		assert!(header.contains("oauth_verifier=\"uw7NjWHT6OJ1MpJOXsHfNxoAhPKpgI8BlYDhxEjIBY\""));
	}

	#[test]
	fn token_secret_changes_access_token_signature() {
		let flow = flow();
		let overrides = OAuthOverrides::default().nonce("n").timestamp(1);
		let token = extract_request_token(200, "oauth_token=tok&oauth_token_secret=sec")
			.expect("Fixture reply should parse.");
		let without =
			flow.obtain_access_token("tok", "ver", &overrides).expect("Call should sign.");
		let with = flow
			.obtain_access_token_with_secret(&token, "ver", &overrides)
			.expect("Call should sign.");

		assert_ne!(without.authorization, with.authorization);
	}
}
