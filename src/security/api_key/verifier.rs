//! API key verifier implementation.

use std::sync::Arc;

use actix_web::HttpRequest;
use async_trait::async_trait;

use super::config::{ApiKeyConfig, ApiKeyLocation};
use super::repository::ApiKeyRepository;
use crate::error::AuthError;
use crate::security::account::{Account, AccountRepository};
use crate::security::verifier::CredentialVerifier;

/// Verifier that resolves a presented API key to its owning account.
///
/// The key is extracted from the configured locations in order and looked
/// up in the key repository; the owning account must exist and be active.
///
/// # Example
/// ```ignore
/// let verifier = ApiKeyVerifier::new(keys, accounts)
///     .config(ApiKeyConfig::header("X-API-Key"));
/// ```
pub struct ApiKeyVerifier {
    keys: Arc<dyn ApiKeyRepository>,
    accounts: Arc<dyn AccountRepository>,
    config: ApiKeyConfig,
}

impl ApiKeyVerifier {
    /// Creates a verifier over the given key and account stores with the
    /// default extraction locations.
    pub fn new(keys: Arc<dyn ApiKeyRepository>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self {
            keys,
            accounts,
            config: ApiKeyConfig::default(),
        }
    }

    /// Sets the extraction configuration.
    pub fn config(mut self, config: ApiKeyConfig) -> Self {
        self.config = config;
        self
    }

    /// Extracts the API key from the request based on configured locations.
    fn extract_key(&self, req: &HttpRequest) -> Option<String> {
        self.config
            .get_locations()
            .iter()
            .find_map(|location| Self::extract_from_location(req, location))
    }

    fn extract_from_location(req: &HttpRequest, location: &ApiKeyLocation) -> Option<String> {
        match location {
            ApiKeyLocation::Header(name) => req
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
            ApiKeyLocation::Query(name) => req.query_string().split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                if key == name {
                    Some(urlencoding::decode(value).ok()?.into_owned())
                } else {
                    None
                }
            }),
            ApiKeyLocation::AuthorizationHeader(scheme) => req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|auth| {
                    let (auth_scheme, token) = auth.split_once(' ')?;
                    if auth_scheme.eq_ignore_ascii_case(scheme) {
                        Some(token.to_string())
                    } else {
                        None
                    }
                }),
        }
    }

    /// Validates a key value and resolves the owning account.
    fn validate_key(&self, key_value: &str) -> Result<Account, AuthError> {
        let key = self
            .keys
            .find_by_key(key_value)
            .ok_or(AuthError::Unauthorized)?;

        let account = self
            .accounts
            .find_by_id(key.get_account_id())
            .ok_or(AuthError::Unauthorized)?;

        if !account.is_active() {
            return Err(AuthError::Unauthorized);
        }

        Ok(account)
    }
}

#[async_trait(?Send)]
impl CredentialVerifier for ApiKeyVerifier {
    async fn verify(&self, req: &HttpRequest) -> Result<Account, AuthError> {
        let key_value = self.extract_key(req).ok_or(AuthError::Unauthorized)?;
        self.validate_key(&key_value)
    }
}
