//! API key model, storage and verification.
//!
//! Keys are opaque tokens bound to exactly one account. They are minted by
//! the issuance endpoints through [`ApiKeyRepository::get_or_create`] and
//! presented back on later requests, where [`ApiKeyVerifier`] resolves
//! them to the owning account.
//!
//! A key can be extracted from:
//! - **Header** (recommended): `X-API-Key: tok_abc123`
//! - **Authorization header**: `Authorization: ApiKey tok_abc123`
//! - **Query parameter**: `?api_key=tok_abc123`

mod config;
mod key;
mod repository;
mod verifier;

pub use config::{ApiKeyConfig, ApiKeyLocation};
pub use key::ApiKey;
pub use repository::{ApiKeyRepository, InMemoryApiKeyRepository};
pub use verifier::ApiKeyVerifier;
