//! Transport seam for executing signed requests.
//!
//! Signing and response parsing never touch the network. Callers that want the crate to drive
//! the token exchanges implement [`OAuthHttpClient`] for their HTTP stack (a reqwest-backed
//! [`ReqwestHttpClient`] ships behind the default `reqwest` feature). No retries happen here;
//! retry policy stays with the caller.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError, request::SignedRequest};
#[cfg(feature = "reqwest")] use crate::request::HttpMethod;

/// Boxed future returned by [`OAuthHttpClient::execute`].
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Status and body of a provider response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}

/// Abstraction over HTTP transports capable of sending a [`SignedRequest`].
///
/// Implementations must be `Send + Sync + 'static` so one client can back many flows, and the
/// futures they return must be `Send` so flows can hop executors.
pub trait OAuthHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` exactly once and reports the raw response.
	fn execute<'a>(&'a self, request: &'a SignedRequest) -> TransportFuture<'a, RawResponse>;
}
impl<T> OAuthHttpClient for Arc<T>
where
	T: ?Sized + OAuthHttpClient,
{
	fn execute<'a>(&'a self, request: &'a SignedRequest) -> TransportFuture<'a, RawResponse> {
		(**self).execute(request)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl OAuthHttpClient for ReqwestHttpClient {
	fn execute<'a>(&'a self, request: &'a SignedRequest) -> TransportFuture<'a, RawResponse> {
		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Put => reqwest::Method::PUT,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder = self.0.request(method, request.url.clone());

			for (name, value) in request.headers() {
				builder = builder.header(name, value);
			}
			if let Some(body) = &request.body {
				builder = builder.body(body.clone());
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(RawResponse { status, body })
		})
	}
}
