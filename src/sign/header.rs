//! `Authorization: OAuth ...` header assembly.

// self
use crate::{_prelude::*, encode, sign::OAuthParams};

/// Name of the header carrying the OAuth credentials.
pub const AUTHORIZATION: &str = "Authorization";

/// Fully assembled `Authorization` header value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthorizationHeader(String);
impl AuthorizationHeader {
	/// Header value, starting with `OAuth `.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Consumes the header and returns the value.
	pub fn into_string(self) -> String {
		self.0
	}
}
impl AsRef<str> for AuthorizationHeader {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl Debug for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		// The value carries no secrets, but keep it out of logs anyway since it authenticates.
		f.write_str("AuthorizationHeader(OAuth ..)")
	}
}

/// Assembles the header from the protocol parameters and the raw base64 `signature`.
///
/// Parameters appear in ascending name order, each value percent-encoded and double-quoted,
/// separated by `, `.
pub fn authorization_header(oauth: &OAuthParams, signature: &str) -> AuthorizationHeader {
	let mut pairs = oauth.pairs();

	pairs.push(("oauth_signature", signature.to_owned()));
	pairs.sort();

	let body = pairs
		.iter()
		.map(|(name, value)| format!("{name}=\"{}\"", encode::quote_str(value)))
		.collect::<Vec<_>>()
		.join(", ");

	AuthorizationHeader(format!("OAuth {body}"))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::sign::OAuthOverrides;

	#[test]
	fn header_lists_parameters_in_name_order() {
		let oauth = OAuthParams::new("ck")
			.apply(&OAuthOverrides::default().nonce("abc").timestamp(10))
			.with_callback("https://app.example.com/cb");
		let header = authorization_header(&oauth, "sig/=");

		assert_eq!(
			header.as_str(),
			"OAuth oauth_callback=\"https%3A%2F%2Fapp.example.com%2Fcb\", \
			 oauth_consumer_key=\"ck\", oauth_nonce=\"abc\", oauth_signature=\"sig%2F%3D\", \
			 oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"10\", oauth_version=\"1.0\""
		);
	}
}
