//! End-user identifiers issued by the provider.

// self
use crate::{_prelude::*, error::CredentialsError};

/// Provider-issued user identifier: a positive integer or an opaque string.
///
/// Numeric identifiers order before opaque ones; within a variant the natural ordering applies.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawUserId", into = "RawUserId")]
pub enum UserId {
	/// Positive numeric identifier.
	Numeric(u64),
	/// Opaque, non-empty identifier.
	Opaque(String),
}
impl UserId {
	/// Validates and wraps a numeric identifier.
	pub fn numeric(value: u64) -> Result<Self, CredentialsError> {
		if value == 0 {
			return Err(CredentialsError::InvalidUserId);
		}

		Ok(Self::Numeric(value))
	}

	/// Parses an identifier, preferring the numeric form when the text is all digits.
	pub fn parse(raw: &str) -> Result<Self, CredentialsError> {
		let trimmed = raw.trim();

		if trimmed.is_empty() {
			return Err(CredentialsError::InvalidUserId);
		}
		if let Ok(value) = trimmed.parse::<u64>() {
			return Self::numeric(value);
		}

		Ok(Self::Opaque(trimmed.to_owned()))
	}
}
impl Debug for UserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "UserId({self})")
	}
}
impl Display for UserId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			UserId::Numeric(value) => write!(f, "{value}"),
			UserId::Opaque(value) => f.write_str(value),
		}
	}
}
impl FromStr for UserId {
	type Err = CredentialsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
impl TryFrom<u64> for UserId {
	type Error = CredentialsError;

	fn try_from(value: u64) -> Result<Self, Self::Error> {
		Self::numeric(value)
	}
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawUserId {
	Numeric(u64),
	Opaque(String),
}
impl TryFrom<RawUserId> for UserId {
	type Error = CredentialsError;

	fn try_from(raw: RawUserId) -> Result<Self, Self::Error> {
		match raw {
			RawUserId::Numeric(value) => Self::numeric(value),
			RawUserId::Opaque(value) => Self::parse(&value),
		}
	}
}
impl From<UserId> for RawUserId {
	fn from(id: UserId) -> Self {
		match id {
			UserId::Numeric(value) => RawUserId::Numeric(value),
			UserId::Opaque(value) => RawUserId::Opaque(value),
		}
	}
}
