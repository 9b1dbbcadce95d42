//! OAuth 1.0a HMAC-SHA1 signing pipeline.
//!
//! The stages are exposed individually so each can be checked against published vectors:
//!
//! 1. [`parameter_string`] normalizes request + protocol parameters.
//! 2. [`signature_base_string`] joins the method, [`normalize_base_url`], and the parameter string.
//! 3. [`signing_key`] derives the HMAC key from the consumer and token secrets.
//! 4. [`sign_hmac_sha1`] computes the base64 digest.
//! 5. [`authorization_header`] renders the `Authorization` header.
//!
//! [`OAuthSigner`] runs the whole pipeline for a request. Every stage is pure apart from nonce
//! and timestamp generation, so signers can be shared freely across threads.

pub mod base_string;
pub mod header;
pub mod hmac_sha1;
pub mod key;
pub mod nonce;
pub mod params;

pub use base_string::*;
pub use header::*;
pub use hmac_sha1::*;
pub use key::*;
pub use nonce::*;
pub use params::*;

// self
use crate::{
	_prelude::*,
	auth::{AppCredentials, ClientCredentials, Secret},
	encode::Value,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Output of a full signing pass.
#[derive(Clone, Debug)]
pub struct Signature {
	/// Text that was signed.
	pub base_string: String,
	/// Raw base64 `oauth_signature` value.
	pub signature: String,
	/// Rendered `Authorization` header.
	pub header: AuthorizationHeader,
}

/// Signs requests on behalf of a consumer and, optionally, a token holder.
#[derive(Clone, Copy, Debug)]
pub struct OAuthSigner<'a> {
	app: &'a AppCredentials,
	token: Option<&'a str>,
	token_secret: Option<&'a Secret>,
}
impl<'a> OAuthSigner<'a> {
	/// Consumer-only signer (temporary credential requests).
	pub fn new(app: &'a AppCredentials) -> Self {
		Self { app, token: None, token_secret: None }
	}

	/// Signer acting for an authorized end user.
	pub fn for_client(app: &'a AppCredentials, client: &'a ClientCredentials) -> Self {
		Self::new(app).with_token(client.token(), Some(client.secret()))
	}

	/// Attaches `oauth_token` and, when known, its secret.
	pub fn with_token(mut self, token: &'a str, secret: Option<&'a Secret>) -> Self {
		self.token = Some(token);
		self.token_secret = secret;

		self
	}

	/// Fresh protocol parameters for this signer with `overrides` applied.
	pub fn oauth_params(&self, overrides: &OAuthOverrides) -> OAuthParams {
		let params = OAuthParams::new(self.app.key()).apply(overrides);

		match self.token {
			Some(token) => params.with_token(token),
			None => params,
		}
	}

	/// Signs a request.
	///
	/// Query parameters embedded in `url` are folded into the signature parameters alongside
	/// `params`; the base URI never carries them.
	pub fn sign(
		&self,
		method: &str,
		url: &Url,
		params: &Params,
		oauth: &OAuthParams,
	) -> Result<Signature> {
		const KIND: FlowKind = FlowKind::SignRequest;

		let _span = FlowSpan::new(KIND, "sign").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = self.sign_inner(method, url, params, oauth);

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}

	fn sign_inner(
		&self,
		method: &str,
		url: &Url,
		params: &Params,
		oauth: &OAuthParams,
	) -> Result<Signature> {
		let base_url = normalize_base_url(url)?;
		let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
		let protocol = oauth.pairs();
		let all = params
			.iter()
			.map(|(name, value)| (name, value.clone()))
			.chain(query.iter().map(|(name, value)| (name.as_str(), Value::from(value))))
			.chain(protocol.iter().map(|(name, value)| (*name, Value::from(value))));
		let base_string = signature_base_string(method, &base_url, &parameter_string(all));
		let key = signing_key(self.app.secret().expose(), self.token_secret.map(Secret::expose));
		let signature = sign_hmac_sha1(&base_string, &key)?;
		let header = authorization_header(oauth, &signature);

		Ok(Signature { base_string, signature, header })
	}
}
