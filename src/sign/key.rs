//! Signing key derivation.

// self
use crate::encode;

/// `quote(consumer_secret) & quote(token_secret)`; the token half is empty when absent.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
	let token_secret = token_secret.unwrap_or_default();

	format!("{}&{}", encode::quote_str(consumer_secret), encode::quote_str(token_secret))
}
