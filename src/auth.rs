//! Credential value objects: consumer identity, per-user access grants, and redacted secrets.

pub mod app;
pub mod client;
pub mod env;
pub mod id;
pub mod secret;

pub use app::*;
pub use client::*;
pub use env::*;
pub use id::*;
pub use secret::*;
