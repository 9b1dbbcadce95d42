//! OAuth 1.0a request signing with byte-exact HMAC-SHA1 headers, redacted credential value
//! objects, and a transport-agnostic three-legged authorization flow.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod encode;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod request;
pub mod sign;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::AppCredentials, flows::ThreeLeggedFlow, http::ReqwestHttpClient,
		provider::ProviderDescriptor,
	};

	/// Consumer key used by the signing fixtures.
	pub const FIXTURE_APP_KEY: &str = "xvz1evFS4wEEPTGEFPHBog";
	/// Consumer secret used by the signing fixtures.
	pub const FIXTURE_APP_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
	/// Access token used by the signing fixtures.
	pub const FIXTURE_USER_TOKEN: &str = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
	/// Access token secret used by the signing fixtures.
	pub const FIXTURE_USER_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a provider descriptor whose endpoints live on a mock server rooted at `base`.
	pub fn mock_provider(base: &str) -> ProviderDescriptor {
		let url = |path: &str| {
			Url::parse(&format!("{base}{path}")).expect("Mock endpoint URL should parse.")
		};

		ProviderDescriptor::builder("mock-provider")
			.request_token_endpoint(url("/oauth/request_token"))
			.authorize_endpoint(url("/oauth/authenticate"))
			.access_token_endpoint(url("/oauth/access_token"))
			.build()
			.expect("Mock provider descriptor should build successfully.")
	}

	/// Constructs a [`ThreeLeggedFlow`] against the mock provider using the fixture consumer.
	pub fn build_test_flow(base: &str) -> (ThreeLeggedFlow, ReqwestHttpClient) {
		let app = AppCredentials::new(FIXTURE_APP_KEY, FIXTURE_APP_SECRET)
			.expect("Fixture app credentials should be valid.");

		(ThreeLeggedFlow::new(mock_provider(base), app), test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		hash::{Hash, Hasher},
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, proptest as _, tokio as _};
