//! Credential verification strategies and the stores behind them.
//!
//! # Module Structure
//!
//! - `account` - Account model and repository
//! - `api_key` - API key model, storage and verification
//! - `basic` - HTTP Basic Authentication support
//! - `crypto` - Password encoding seam
//! - `facebook` - Facebook OAuth2 token verification
//! - `verifier` - The `CredentialVerifier` strategy trait

pub use account::{Account, AccountRepository, InMemoryAccountRepository};
pub use api_key::{
    ApiKey, ApiKeyConfig, ApiKeyLocation, ApiKeyRepository, ApiKeyVerifier,
    InMemoryApiKeyRepository,
};
pub use basic::{extract_basic_auth, BasicVerifier};
pub use crypto::{NoOpPasswordEncoder, PasswordEncoder};
pub use facebook::{
    FacebookGraph, FacebookProfile, FacebookVerifier, GraphApiClient, GraphError,
    FACEBOOK_GRAPH_URL,
};
pub use verifier::CredentialVerifier;

pub mod account;
pub mod api_key;
pub mod basic;
pub mod crypto;
pub mod facebook;
pub mod verifier;
