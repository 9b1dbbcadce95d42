//! Nonce and timestamp sources for `oauth_nonce` / `oauth_timestamp`.

// crates.io
use rand::{Rng, distr::Alphanumeric};
use time::OffsetDateTime;

/// Default nonce length in characters.
pub const DEFAULT_NONCE_LEN: usize = 42;

/// Returns a fresh alphanumeric nonce of [`DEFAULT_NONCE_LEN`] characters.
pub fn generate_nonce() -> String {
	generate_nonce_with_len(DEFAULT_NONCE_LEN)
}

/// Returns a fresh alphanumeric nonce of exactly `len` characters.
///
/// Drawn from the thread-local CSPRNG, which is safe to call from any thread.
pub fn generate_nonce_with_len(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

/// Current Unix time in whole seconds.
pub fn generate_timestamp() -> i64 {
	OffsetDateTime::now_utc().unix_timestamp()
}
