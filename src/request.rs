//! Outbound API requests and the signed descriptors handed to the transport layer.

// self
use crate::{
	_prelude::*,
	encode::Value,
	sign::{AUTHORIZATION, AuthorizationHeader, OAuthOverrides, OAuthParams, OAuthSigner, Params},
};

/// Content type of signed form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP methods a signed request may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Uppercase method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}

	/// Whether parameters travel in a form body rather than the query string.
	pub const fn sends_body(self) -> bool {
		matches!(self, HttpMethod::Post | HttpMethod::Put)
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// An API call to be signed; the caller owns it and the signer only reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Endpoint URL; any query it carries is signed as well.
	pub url: Url,
	/// Resource family (for example `statuses`), used for bookkeeping only.
	pub resource_family: String,
	/// Resource path within the family (for example `/statuses/update`).
	pub resource: String,
	/// Request-specific parameters.
	pub params: Params,
}
impl ApiRequest {
	/// Creates a request with no parameters and empty resource labels.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self {
			method,
			url,
			resource_family: String::new(),
			resource: String::new(),
			params: Params::new(),
		}
	}

	/// Sets the resource family and resource labels.
	pub fn with_resource(
		mut self,
		family: impl Into<String>,
		resource: impl Into<String>,
	) -> Self {
		self.resource_family = family.into();
		self.resource = resource.into();

		self
	}

	/// Appends a request parameter.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.params.push(name, value);

		self
	}

	/// Signs the request with fresh protocol parameters.
	pub fn sign(
		&self,
		signer: &OAuthSigner<'_>,
		overrides: &OAuthOverrides,
	) -> Result<SignedRequest> {
		self.sign_with(signer, &signer.oauth_params(overrides))
	}

	/// Signs the request with an explicit protocol parameter set.
	pub fn sign_with(
		&self,
		signer: &OAuthSigner<'_>,
		oauth: &OAuthParams,
	) -> Result<SignedRequest> {
		let signature = signer.sign(self.method.as_str(), &self.url, &self.params, oauth)?;

		Ok(SignedRequest::from_parts(self.method, self.url.clone(), &self.params, signature.header))
	}
}

/// Ready-to-send request descriptor: everything the transport needs, nothing it must compute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Final URL, including request parameters for query-carrying methods.
	pub url: Url,
	/// Form-encoded body for body-carrying methods with parameters.
	pub body: Option<String>,
	/// Signed `Authorization` header.
	pub authorization: AuthorizationHeader,
}
impl SignedRequest {
	pub(crate) fn from_parts(
		method: HttpMethod,
		mut url: Url,
		params: &Params,
		authorization: AuthorizationHeader,
	) -> Self {
		let mut body = None;

		if !params.is_empty() {
			let encoded = params.to_encoded();

			if method.sends_body() {
				body = Some(encoded);
			} else {
				let query = match url.query().filter(|q| !q.is_empty()) {
					Some(existing) => format!("{existing}&{encoded}"),
					None => encoded,
				};

				url.set_query(Some(&query));
			}
		}

		Self { method, url, body, authorization }
	}

	/// Header list to attach, `Authorization` first.
	pub fn headers(&self) -> Vec<(&'static str, String)> {
		let mut headers = vec![(AUTHORIZATION, self.authorization.as_str().to_owned())];

		if self.body.is_some() {
			headers.push(("Content-Type", FORM_CONTENT_TYPE.to_owned()));
		}

		headers
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::AppCredentials;

	fn app() -> AppCredentials {
		AppCredentials::new("key", "secret").expect("Fixture app credentials should be valid.")
	}

	fn fixed() -> OAuthOverrides {
		OAuthOverrides::default().nonce("nonce").timestamp(1)
	}

	#[test]
	fn post_parameters_travel_in_form_body() {
		let app = app();
		let request = ApiRequest::new(
			HttpMethod::Post,
			Url::parse("https://api.example.com/1/statuses/update.json")
				.expect("URL should parse."),
		)
		.with_resource("statuses", "/statuses/update")
		.param("status", "hi there/you");
		let signed = request.sign(&OAuthSigner::new(&app), &fixed()).expect("Request should sign.");

		assert_eq!(signed.url.as_str(), "https://api.example.com/1/statuses/update.json");
		assert_eq!(signed.body.as_deref(), Some("status=hi%20there%2Fyou"));
		assert_eq!(signed.headers()[1], ("Content-Type", FORM_CONTENT_TYPE.to_owned()));
	}

	#[test]
	fn get_parameters_extend_existing_query() {
		let app = app();
		let request = ApiRequest::new(
			HttpMethod::Get,
			Url::parse("https://api.example.com/1/search.json?lang=en").expect("URL should parse."),
		)
		.param("q", "rust lang")
		.param("count", 5_i64);
		let signed = request.sign(&OAuthSigner::new(&app), &fixed()).expect("Request should sign.");

		assert_eq!(
			signed.url.as_str(),
			"https://api.example.com/1/search.json?lang=en&q=rust%20lang&count=5"
		);
		assert!(signed.body.is_none());
		assert_eq!(signed.headers().len(), 1);
	}

	#[test]
	fn signing_is_stable_for_fixed_protocol_values() {
		let app = app();
		let signer = OAuthSigner::new(&app);
		let request = ApiRequest::new(
			HttpMethod::Delete,
			Url::parse("https://api.example.com/1/items/9.json").expect("URL should parse."),
		);
		let a = request.sign(&signer, &fixed()).expect("Request should sign.");
		let b = request.sign(&signer, &fixed()).expect("Request should sign.");

		assert_eq!(a, b);
		assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
	}
}
