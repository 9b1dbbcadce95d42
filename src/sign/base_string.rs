//! Signature base string construction.

// self
use crate::{_prelude::*, encode, error::ConfigError};

/// Normalizes a request URL into the base string URI.
///
/// Scheme and host are lower-cased, default ports dropped, and any query, fragment, or userinfo
/// removed. Query parameters must be folded into the parameter set by the caller.
pub fn normalize_base_url(url: &Url) -> Result<String, ConfigError> {
	let host = url
		.host_str()
		.filter(|host| !host.is_empty())
		.ok_or_else(|| ConfigError::UnsupportedBaseUrl { url: url.to_string() })?;
	let mut base = format!("{}://{}", url.scheme().to_ascii_lowercase(), host.to_ascii_lowercase());

	// `Url::port` is already `None` for the scheme's default port.
	if let Some(port) = url.port() {
		base.push(':');
		base.push_str(&port.to_string());
	}

	base.push_str(url.path());

	Ok(base)
}

/// Combines method, base URI, and parameter string into the text that gets signed.
pub fn signature_base_string(method: &str, base_url: &str, parameter_string: &str) -> String {
	format!(
		"{}&{}&{}",
		method.to_ascii_uppercase(),
		encode::quote_str(base_url),
		encode::quote_str(parameter_string)
	)
}
