//! HMAC-SHA1 signature computation.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
// self
use crate::error::CryptoError;

type HmacSha1 = Hmac<Sha1>;

/// Signs `base_string` with `signing_key` and returns the standard base64 digest.
///
/// The result is the raw `oauth_signature` value; it still needs percent-encoding when placed
/// into a header or query string.
pub fn sign_hmac_sha1(base_string: &str, signing_key: &str) -> Result<String, CryptoError> {
	let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())?;

	mac.update(base_string.as_bytes());

	Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rfc2202_vector_matches() {
		// RFC 2202 test case 2.
		let digest =
			sign_hmac_sha1("what do ya want for nothing?", "Jefe").expect("HMAC should sign.");

		// 0xeffcdf6ae5eb2fa2d27416d5f184df9c259a7c79
		assert_eq!(digest, "7/zfauXrL6LSdBbV8YTfnCWafHk=");
	}

	#[test]
	fn empty_key_is_accepted() {
		assert!(sign_hmac_sha1("payload", "").is_ok());
	}
}
