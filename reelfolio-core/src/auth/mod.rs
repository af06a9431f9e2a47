//! Admin identity: bearer tokens resolved to an email by the auth service,
//! then checked against the configured allowlist.

pub mod allowlist;
pub mod client;

pub use allowlist::AdminAllowlist;
pub use client::{AdminIdentity, AuthClient, StaticTokenAuth, SupabaseAuthClient};
