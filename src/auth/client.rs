//! Per-user access grants and their JSON persistence format.

// std
use std::{
	cmp::Ordering,
	ffi::OsStr,
	fs::{self, File},
	io::Write,
	path::Path,
};
// crates.io
use serde_json::{Map, Value as JsonValue};
// self
use crate::{
	_prelude::*,
	auth::{EnvSource, ProcessEnv, Secret, UserId, env},
	error::CredentialsError,
};

/// Environment variable holding the user identifier.
pub const USER_ID_ENV: &str = "TWITTER_USER_ID";
/// Environment variable holding the user access token.
pub const USER_TOKEN_ENV: &str = "TWITTER_USER_TOKEN";
/// Environment variable holding the user access token secret.
pub const USER_SECRET_ENV: &str = "TWITTER_USER_SECRET";

/// Immutable access grant for a single end user.
///
/// Ordering is by `user_id` first; token and secret only break ties so `Ord` agrees with `Eq`.
/// Serialization uses the `{ "user_id", "token", "secret" }` object shape and exposes the
/// secret, so only hand serialized values to trusted storage.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawClientCredentials", into = "RawClientCredentials")]
pub struct ClientCredentials {
	user_id: UserId,
	token: String,
	secret: Secret,
}
impl ClientCredentials {
	/// Validates and builds a new access grant.
	pub fn new(
		user_id: UserId,
		token: impl Into<String>,
		secret: impl Into<String>,
	) -> Result<Self, CredentialsError> {
		let token = token.into();
		let secret = Secret::new(secret);

		if token.is_empty() {
			return Err(CredentialsError::EmptyField { field: "token" });
		}
		if secret.is_empty() {
			return Err(CredentialsError::EmptyField { field: "secret" });
		}

		Ok(Self { user_id, token, secret })
	}

	/// Loads the grant from `TWITTER_USER_ID` / `TWITTER_USER_TOKEN` / `TWITTER_USER_SECRET`.
	pub fn from_env(source: &impl EnvSource) -> Result<Self, CredentialsError> {
		let user_id = UserId::parse(&env::require(source, USER_ID_ENV)?)?;

		let token = env::require(source, USER_TOKEN_ENV)?;
		let secret = env::require(source, USER_SECRET_ENV)?;

		Self::new(user_id, token, secret)
	}

	/// Loads the grant from the process environment.
	pub fn load_from_env() -> Result<Self, CredentialsError> {
		Self::from_env(&ProcessEnv)
	}

	/// Provider-issued user identifier.
	pub fn user_id(&self) -> &UserId {
		&self.user_id
	}

	/// Access token sent as `oauth_token`.
	pub fn token(&self) -> &str {
		&self.token
	}

	/// Access token secret; only ever used to derive signing keys.
	pub fn secret(&self) -> &Secret {
		&self.secret
	}

	/// Plain mapping with `user_id`, `token`, and `secret` keys.
	pub fn as_dict(&self) -> Map<String, JsonValue> {
		let user_id = match &self.user_id {
			UserId::Numeric(value) => JsonValue::from(*value),
			UserId::Opaque(value) => JsonValue::from(value.as_str()),
		};
		let mut map = Map::new();

		map.insert("user_id".into(), user_id);
		map.insert("token".into(), JsonValue::from(self.token.as_str()));
		map.insert("secret".into(), JsonValue::from(self.secret.expose()));

		map
	}

	/// Rebuilds a grant from the mapping produced by [`as_dict`](Self::as_dict).
	pub fn from_dict(map: &Map<String, JsonValue>) -> Result<Self, CredentialsError> {
		Ok(serde_path_to_error::deserialize(JsonValue::Object(map.clone()))?)
	}

	/// Reads a JSON array of grants from `path`.
	pub fn load_many_from_json(path: impl AsRef<Path>) -> Result<Vec<Self>, CredentialsError> {
		let path = path.as_ref();
		let bytes = fs::read(path)
			.map_err(|source| CredentialsError::Io { path: path.to_path_buf(), source })?;
		let de = &mut serde_json::Deserializer::from_slice(&bytes);

		Ok(serde_path_to_error::deserialize(de)?)
	}

	/// Writes `creds` to `path` as a JSON array, replacing the file atomically.
	pub fn save_many_to_json(
		path: impl AsRef<Path>,
		creds: &[ClientCredentials],
	) -> Result<(), CredentialsError> {
		let path = path.as_ref();
		let io_err = |source| CredentialsError::Io { path: path.to_path_buf(), source };

		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(io_err)?;
		}

		let serialized = serde_json::to_vec_pretty(creds).map_err(CredentialsError::Serialize)?;
		// `<name>.tmp` beside the target; never `path` itself.
		let mut tmp_name = path.file_name().map(OsStr::to_os_string).unwrap_or_default();

		tmp_name.push(".tmp");

		let tmp_path = path.with_file_name(tmp_name);
		let written =
			write_synced(&tmp_path, &serialized).and_then(|()| fs::rename(&tmp_path, path));

		if let Err(source) = written {
			let _ = fs::remove_file(&tmp_path);

			return Err(io_err(source));
		}

		Ok(())
	}
}

impl PartialOrd for ClientCredentials {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
impl Ord for ClientCredentials {
	fn cmp(&self, other: &Self) -> Ordering {
		self.user_id
			.cmp(&other.user_id)
			.then_with(|| self.token.cmp(&other.token))
			.then_with(|| self.secret.cmp(&other.secret))
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("user_id", &self.user_id)
			.field("token", &self.token)
			.field("secret", &self.secret)
			.finish()
	}
}
impl Display for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ClientCredentials({}, {}, {})", self.user_id, self.token, self.secret)
	}
}

#[derive(Serialize, Deserialize)]
struct RawClientCredentials {
	user_id: UserId,
	token: String,
	secret: String,
}
impl TryFrom<RawClientCredentials> for ClientCredentials {
	type Error = CredentialsError;

	fn try_from(raw: RawClientCredentials) -> Result<Self, Self::Error> {
		Self::new(raw.user_id, raw.token, raw.secret)
	}
}
impl From<ClientCredentials> for RawClientCredentials {
	fn from(creds: ClientCredentials) -> Self {
		let secret = creds.secret.expose().to_owned();

		Self { user_id: creds.user_id, token: creds.token, secret }
	}
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
	let mut file = File::create(path)?;

	file.write_all(bytes)?;
	file.sync_all()
}

#[cfg(test)]
mod tests {
	// std
	use std::{env as std_env, process};
	// self
	use super::*;

	fn creds(id: u64, token: &str, secret: &str) -> ClientCredentials {
		let user_id = UserId::numeric(id).expect("Fixture id should be valid.");

		ClientCredentials::new(user_id, token, secret)
			.expect("Fixture credentials should be valid.")
	}

	fn temp_path(tag: &str) -> std::path::PathBuf {
		std_env::temp_dir().join(format!(
			"oauth1_broker_client_{tag}_{}_{}.json",
			process::id(),
			time::OffsetDateTime::now_utc().unix_timestamp_nanos(),
		))
	}

	#[test]
	fn ordering_follows_user_id() {
		let mut all = vec![creds(3, "c", "z"), creds(1, "a", "y"), creds(2, "b", "x")];

		all.sort();

		let ids: Vec<_> = all.iter().map(|c| c.user_id().to_string()).collect();

		assert_eq!(ids, ["1", "2", "3"]);
		assert!(creds(1, "z", "z") < creds(2, "a", "a"));
	}

	#[test]
	fn dict_round_trip_preserves_fields() {
		let original = creds(1729, "token", "secret");
		let map = original.as_dict();

		assert_eq!(map.get("user_id"), Some(&JsonValue::from(1729_u64)));
		assert_eq!(map.get("token"), Some(&JsonValue::from("token")));
		assert_eq!(map.get("secret"), Some(&JsonValue::from("secret")));
		assert_eq!(ClientCredentials::from_dict(&map).expect("Mapping should rebuild."), original);
	}

	#[test]
	fn from_dict_rejects_empty_token() {
		let mut map = creds(1, "token", "secret").as_dict();

		map.insert("token".into(), JsonValue::from(""));

		assert!(ClientCredentials::from_dict(&map).is_err());
	}

	#[test]
	fn from_env_reads_all_three_variables() {
		let env = BTreeMap::from([
			(USER_ID_ENV.to_owned(), "42".to_owned()),
			(USER_TOKEN_ENV.to_owned(), "tok".to_owned()),
			(USER_SECRET_ENV.to_owned(), "sec".to_owned()),
		]);
		let loaded = ClientCredentials::from_env(&env).expect("Env mapping should load.");

		assert_eq!(loaded, creds(42, "tok", "sec"));
	}

	#[test]
	fn save_and_load_many_round_trip() {
		let path = temp_path("round_trip");
		let all = vec![creds(1, "a", "x"), creds(2, "b", "y")];

		ClientCredentials::save_many_to_json(&path, &all).expect("Credentials should save.");

		let loaded =
			ClientCredentials::load_many_from_json(&path).expect("Credentials should load.");

		assert_eq!(loaded, all);
		assert!(!tmp_sibling(&path).exists());

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary credential file {}: {e}", path.display())
		});
	}

	fn tmp_sibling(path: &Path) -> std::path::PathBuf {
		let mut raw = path.as_os_str().to_os_string();

		raw.push(".tmp");

		raw.into()
	}

	#[test]
	fn save_to_tmp_named_target_stays_atomic() {
		let path = temp_path("tmp_target").with_extension("tmp");
		let all = vec![creds(5, "e", "v")];

		ClientCredentials::save_many_to_json(&path, &all).expect("Credentials should save.");

		assert_eq!(
			ClientCredentials::load_many_from_json(&path).expect("Credentials should load."),
			all
		);
		assert!(!tmp_sibling(&path).exists());

		fs::remove_file(&path).expect("Saved credential file should be removable.");
	}

	#[test]
	fn failed_save_removes_temp_file() {
		let path = temp_path("dir_target");

		fs::create_dir_all(&path).expect("Blocking directory should be created.");

		let err = ClientCredentials::save_many_to_json(&path, &[creds(1, "a", "x")])
			.expect_err("Replacing a directory should fail.");

		assert!(matches!(err, CredentialsError::Io { .. }));
		assert!(!tmp_sibling(&path).exists());

		fs::remove_dir_all(&path).expect("Blocking directory should be removable.");
	}

	#[test]
	fn load_many_reports_json_path() {
		let path = temp_path("malformed");

		fs::write(
			&path,
			r#"[{"user_id": 1, "token": "a", "secret": "b"}, {"user_id": 2, "token": 9, "secret": "c"}]"#,
		)
		.expect("Fixture file should be written.");

		let err = ClientCredentials::load_many_from_json(&path)
			.expect_err("Numeric token should be rejected.");

		assert!(matches!(
			err,
			CredentialsError::Parse { ref path, .. } if path.starts_with("[1]")
		));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary credential file {}: {e}", path.display())
		});
	}
}
