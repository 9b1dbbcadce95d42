//! Request parameters, OAuth protocol parameters, and the normalized parameter string.

// self
use crate::{
	_prelude::*,
	encode::{self, Value},
	sign::nonce,
};

/// `oauth_signature_method` value emitted by this crate.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// `oauth_version` value emitted by this crate.
pub const OAUTH_VERSION: &str = "1.0";

/// Ordered request parameters; duplicate names are kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(Vec<(String, Value)>);
impl Params {
	/// Creates an empty parameter list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a parameter and returns the list.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.push(name, value);

		self
	}

	/// Appends a parameter in place.
	pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		self.0.push((name.into(), value.into()));
	}

	/// Iterates over `(name, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameters are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Percent-encoded `name=value` pairs joined with `&`, in insertion order.
	///
	/// Suitable for query strings and `application/x-www-form-urlencoded` bodies.
	pub fn to_encoded(&self) -> String {
		self.iter()
			.map(|(name, value)| {
				format!("{}={}", encode::quote_str(name), encode::quote_str(&value.as_text()))
			})
			.collect::<Vec<_>>()
			.join("&")
	}
}
impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect())
	}
}
impl<K, V> Extend<(K, V)> for Params
where
	K: Into<String>,
	V: Into<Value>,
{
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		self.0.extend(iter.into_iter().map(|(name, value)| (name.into(), value.into())));
	}
}

/// Per-request overrides for generated protocol values; deterministic signing uses these.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OAuthOverrides {
	/// Replaces the generated `oauth_nonce`.
	pub nonce: Option<String>,
	/// Replaces the generated `oauth_timestamp`.
	pub timestamp: Option<i64>,
}
impl OAuthOverrides {
	/// Pins the nonce.
	pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
		self.nonce = Some(nonce.into());

		self
	}

	/// Pins the timestamp.
	pub fn timestamp(mut self, timestamp: i64) -> Self {
		self.timestamp = Some(timestamp);

		self
	}
}

/// OAuth protocol parameter set for a single signed request (never includes the signature).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthParams {
	/// `oauth_consumer_key`.
	pub consumer_key: String,
	/// `oauth_nonce`.
	pub nonce: String,
	/// `oauth_timestamp`.
	pub timestamp: i64,
	/// `oauth_token`, absent while requesting temporary credentials.
	pub token: Option<String>,
	/// `oauth_callback`, only sent with the request-token call.
	pub callback: Option<String>,
	/// `oauth_verifier`, only sent with the access-token call.
	pub verifier: Option<String>,
}
impl OAuthParams {
	/// Fresh parameter set with a generated nonce and the current timestamp.
	pub fn new(consumer_key: impl Into<String>) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			nonce: nonce::generate_nonce(),
			timestamp: nonce::generate_timestamp(),
			token: None,
			callback: None,
			verifier: None,
		}
	}

	/// Applies caller-supplied overrides.
	pub fn apply(mut self, overrides: &OAuthOverrides) -> Self {
		if let Some(nonce) = &overrides.nonce {
			self.nonce = nonce.clone();
		}
		if let Some(timestamp) = overrides.timestamp {
			self.timestamp = timestamp;
		}

		self
	}

	/// Sets `oauth_token`.
	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());

		self
	}

	/// Sets `oauth_callback`.
	pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());

		self
	}

	/// Sets `oauth_verifier`.
	pub fn with_verifier(mut self, verifier: impl Into<String>) -> Self {
		self.verifier = Some(verifier.into());

		self
	}

	/// Raw (unencoded) protocol pairs, excluding `oauth_signature`.
	pub fn pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = vec![
			("oauth_consumer_key", self.consumer_key.clone()),
			("oauth_nonce", self.nonce.clone()),
			("oauth_signature_method", SIGNATURE_METHOD.to_owned()),
			("oauth_timestamp", self.timestamp.to_string()),
			("oauth_version", OAUTH_VERSION.to_owned()),
		];

		if let Some(token) = &self.token {
			pairs.push(("oauth_token", token.clone()));
		}
		if let Some(callback) = &self.callback {
			pairs.push(("oauth_callback", callback.clone()));
		}
		if let Some(verifier) = &self.verifier {
			pairs.push(("oauth_verifier", verifier.clone()));
		}

		pairs
	}
}

/// Builds the normalized parameter string.
///
/// Names and values are encoded independently, sorted by encoded name then encoded value, and
/// joined as `name=value` pairs separated by `&`. Insertion order never affects the output.
pub fn parameter_string<'a, I, V>(params: I) -> String
where
	I: IntoIterator<Item = (&'a str, V)>,
	V: Into<Value>,
{
	let mut encoded: Vec<(String, String)> = params
		.into_iter()
		.map(|(name, value)| (encode::quote_str(name), encode::quote(value)))
		.collect();

	encoded.sort();

	encoded.into_iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join("&")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parameter_string_sorts_by_encoded_name_then_value() {
		let params = [("b", "2"), ("a", "z"), ("a", "y"), ("c d", "x/y")];

		assert_eq!(parameter_string(params), "a=y&a=z&b=2&c%20d=x%2Fy");
	}

	#[test]
	fn parameter_string_ignores_insertion_order() {
		let forward: Params = [
			("status", Value::from("hi there")),
			("count", Value::from(5_i64)),
			("flag", Value::from(true)),
		]
		.into_iter()
		.collect();
		let mut reversed =
			forward.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect::<Vec<_>>();

		reversed.reverse();

		let left = parameter_string(forward.iter().map(|(k, v)| (k, v.clone())));
		let right = parameter_string(reversed.iter().map(|(k, v)| (k.as_str(), v.clone())));

		assert_eq!(left, right);
		assert_eq!(left, "count=5&flag=true&status=hi%20there");
	}

	#[test]
	fn oauth_params_include_optional_fields_only_when_set() {
		let base =
			OAuthParams::new("ck").apply(&OAuthOverrides::default().nonce("n").timestamp(7));
		let names: Vec<_> = base.pairs().into_iter().map(|(name, _)| name).collect();

		assert_eq!(
			names,
			[
				"oauth_consumer_key",
				"oauth_nonce",
				"oauth_signature_method",
				"oauth_timestamp",
				"oauth_version"
			]
		);

		let full = base.with_token("t").with_callback("oob").with_verifier("v");
		let names: Vec<_> = full.pairs().into_iter().map(|(name, _)| name).collect();

		assert!(names.contains(&"oauth_token"));
		assert!(names.contains(&"oauth_callback"));
		assert!(names.contains(&"oauth_verifier"));
	}

	#[test]
	fn overrides_pin_generated_values() {
		let params = OAuthParams::new("ck")
			.apply(&OAuthOverrides::default().nonce("fixed").timestamp(1318622958));

		assert_eq!(params.nonce, "fixed");
		assert_eq!(params.timestamp, 1318622958);
	}

	#[test]
	fn params_encode_for_bodies() {
		let params =
			Params::new().with("status", "Hello Ladies + Gentlemen").with("include_entities", true);

		assert_eq!(
			params.to_encoded(),
			"status=Hello%20Ladies%20%2B%20Gentlemen&include_entities=true"
		);
	}
}
