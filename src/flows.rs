//! Three-legged OAuth 1.0a flow: temporary credentials, user authorization, token exchange.
//!
//! The flow moves through these states:
//!
//! 1. **Unauthenticated**: [`ThreeLeggedFlow::obtain_request_token`] builds the signed
//!    request-token call; [`extract_request_token`] parses the reply.
//! 2. **Request token obtained**: [`ThreeLeggedFlow::redirect_url`] yields the URL to send the
//!    end user to.
//! 3. **User authorized**: [`ThreeLeggedFlow::obtain_access_token`] builds the signed verifier
//!    exchange; [`extract_access_token`] parses the reply.
//! 4. **Authorized**: [`AccessTokenResponse::to_client_credentials`] yields the
//!    [`ClientCredentials`](crate::auth::ClientCredentials) used to sign API calls.
//!
//! Rejected or malformed replies come back as [`ExtractError`] values so callers can retry or
//! re-prompt without unwinding.

pub mod response;
pub mod three_legged;

pub use response::*;
pub use three_legged::*;
