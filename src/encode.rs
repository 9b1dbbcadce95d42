//! RFC 3986 percent-encoding over the parameter value types a signed request can carry.
//!
//! Only the unreserved set (`A-Z a-z 0-9 - . _ ~`) passes through untouched; everything else,
//! including `/`, becomes `%XX` with uppercase hex. Non-string values are rendered to their
//! canonical text form first, so `true` encodes as `true` and `1.0` as `1.0`. Floats outside
//! `1e-4..1e16` use a signed exponent of at least two digits (`1e+16`, `1.5e-07`).

// std
use std::borrow::Cow;
// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
// self
use crate::_prelude::*;

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// A request or protocol parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Boolean rendered as lowercase `true`/`false`.
	Boolean(bool),
	/// Signed integer rendered in decimal.
	Integer(i64),
	/// Floating point rendered with a mandatory fractional part.
	Float(f64),
	/// Arbitrary UTF-8 text.
	Text(String),
}
impl Value {
	/// Canonical text form used before percent-encoding.
	pub fn as_text(&self) -> Cow<'_, str> {
		match self {
			Value::Boolean(true) => Cow::Borrowed("true"),
			Value::Boolean(false) => Cow::Borrowed("false"),
			Value::Integer(i) => Cow::Owned(i.to_string()),
			Value::Float(f) => Cow::Owned(float_text(*f)),
			Value::Text(s) => Cow::Borrowed(s),
		}
	}
}
impl Display for Value {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.as_text())
	}
}
impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Boolean(value)
	}
}
impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}
impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::Float(value.into())
	}
}
impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<&String> for Value {
	fn from(value: &String) -> Self {
		Self::Text(value.clone())
	}
}

macro_rules! impl_from_integer {
	($($ty:ty),+) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::Integer(value.into())
				}
			}
		)+
	};
}

impl_from_integer! { i8, i16, i32, i64, u8, u16, u32 }

// `Debug` keeps the trailing `.0` that `Display` drops but writes exponents bare (`1e16`).
fn float_text(value: f64) -> String {
	if value.is_nan() {
		return "nan".into();
	}

	let debug = format!("{value:?}");

	match debug.split_once('e') {
		Some((mantissa, exponent)) => {
			let (sign, digits) = match exponent.strip_prefix('-') {
				Some(digits) => ('-', digits),
				None => ('+', exponent),
			};

			format!("{mantissa}e{sign}{digits:0>2}")
		},
		None => debug,
	}
}

/// Percent-encodes any parameter value.
pub fn quote(value: impl Into<Value>) -> String {
	quote_str(&value.into().as_text())
}

/// Percent-encodes a string slice without allocating an intermediate [`Value`].
pub fn quote_str(raw: &str) -> String {
	utf8_percent_encode(raw, OAUTH_ENCODE_SET).to_string()
}

/// Reverses [`quote_str`]. Invalid UTF-8 sequences are replaced lossily.
pub fn percent_decode(encoded: &str) -> String {
	percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn booleans_encode_lowercase() {
		assert_eq!(quote(true), "true");
		assert_eq!(quote(false), "false");
	}

	#[test]
	fn numbers_use_canonical_decimal() {
		assert_eq!(quote(1_i64), "1");
		assert_eq!(quote(-42_i64), "-42");
		assert_eq!(quote(1.0_f64), "1.0");
		assert_eq!(quote(0.25_f64), "0.25");
	}

	#[test]
	fn float_exponents_are_signed_and_padded() {
		assert_eq!(Value::from(1e16_f64).as_text(), "1e+16");
		assert_eq!(Value::from(1e-5_f64).as_text(), "1e-05");
		assert_eq!(Value::from(1.5e-7_f64).as_text(), "1.5e-07");
		assert_eq!(Value::from(-2.5e300_f64).as_text(), "-2.5e+300");
		assert_eq!(Value::from(1e15_f64).as_text(), "1000000000000000.0");
		assert_eq!(Value::from(0.0001_f64).as_text(), "0.0001");
		assert_eq!(Value::from(f64::NAN).as_text(), "nan");
		assert_eq!(Value::from(f64::NEG_INFINITY).as_text(), "-inf");
		assert_eq!(quote(1e16_f64), "1e%2B16");
	}

	#[test]
	fn slash_and_reserved_characters_are_escaped() {
		assert_eq!(quote("hello/world"), "hello%2Fworld");
		assert_eq!(quote("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
		assert_eq!(
			quote("a!*'();:@&=$,?#[]"),
			"a%21%2A%27%28%29%3B%3A%40%26%3D%24%2C%3F%23%5B%5D"
		);
		assert_eq!(quote("-._~AZaz09"), "-._~AZaz09");
	}

	#[test]
	fn multibyte_text_encodes_per_byte_uppercase() {
		assert_eq!(quote("☃"), "%E2%98%83");
		assert_eq!(quote("é"), "%C3%A9");
	}

	#[test]
	fn quote_then_decode_round_trips() {
		let samples =
			["", "plain", "hello/world", "100% sure & ready?", "snow ☃ man", "tab\tnew\nline"];

		for raw in samples {
			assert_eq!(percent_decode(&quote(raw)), raw);
		}
	}
}
