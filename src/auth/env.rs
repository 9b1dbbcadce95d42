//! Injectable environment lookups used by credential loaders.

// std
use std::env;
// self
use crate::{_prelude::*, error::CredentialsError};

/// Source of environment-style key/value configuration.
pub trait EnvSource {
	/// Returns the value for `key`, if set.
	fn var(&self, key: &str) -> Option<String>;
}
impl<T> EnvSource for &T
where
	T: ?Sized + EnvSource,
{
	fn var(&self, key: &str) -> Option<String> {
		(**self).var(key)
	}
}
impl EnvSource for HashMap<String, String> {
	fn var(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}
impl EnvSource for BTreeMap<String, String> {
	fn var(&self, key: &str) -> Option<String> {
		self.get(key).cloned()
	}
}

/// Reads from the current process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;
impl EnvSource for ProcessEnv {
	fn var(&self, key: &str) -> Option<String> {
		env::var(key).ok()
	}
}

/// Fetches a required, non-empty variable.
pub(crate) fn require(
	env: &impl EnvSource,
	name: &'static str,
) -> Result<String, CredentialsError> {
	env.var(name).filter(|value| !value.is_empty()).ok_or(CredentialsError::MissingEnv { name })
}
