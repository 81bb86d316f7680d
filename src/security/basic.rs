//! HTTP Basic Authentication support.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::HttpRequest;
use async_trait::async_trait;
use base64::prelude::*;

use crate::error::AuthError;
use crate::security::account::{Account, AccountRepository};
use crate::security::crypto::{NoOpPasswordEncoder, PasswordEncoder};
use crate::security::verifier::CredentialVerifier;

/// Extracts credentials from an HTTP Basic Authentication header.
///
/// Parses `Authorization: Basic <base64(username:password)>` and passes the
/// pair to `verify`, which resolves them to an account or rejects them.
pub fn extract_basic_auth<F>(req: &HttpRequest, verify: F) -> Option<Account>
where
    F: FnOnce(&str, &str) -> Option<Account>,
{
    let auth_header = req.headers().get(header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;

    let credentials = auth_str.strip_prefix("Basic ")?;

    let decoded = BASE64_STANDARD.decode(credentials).ok()?;
    let decoded_str = String::from_utf8(decoded).ok()?;

    let (username, password) = decoded_str.split_once(':')?;

    verify(username, password)
}

/// Primary-credential verifier backed by an account repository.
///
/// Checks the presented username+secret against the store through the
/// configured `PasswordEncoder`. Inactive accounts never authenticate.
///
/// # Example
/// ```ignore
/// let verifier = BasicVerifier::new(accounts)
///     .password_encoder(NoOpPasswordEncoder);
/// ```
pub struct BasicVerifier {
    accounts: Arc<dyn AccountRepository>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl BasicVerifier {
    /// Creates a verifier over the given account store with the
    /// pass-through encoder.
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self {
            accounts,
            encoder: Arc::new(NoOpPasswordEncoder),
        }
    }

    /// Sets the password encoder used for secret comparison.
    pub fn password_encoder<E: PasswordEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    /// Verifies a username/password pair and returns the account if valid.
    fn verify_credentials(&self, username: &str, password: &str) -> Option<Account> {
        self.accounts.find_by_username(username).and_then(|account| {
            if account.is_active() && self.encoder.matches(password, account.get_password()) {
                Some(account)
            } else {
                None
            }
        })
    }
}

#[async_trait(?Send)]
impl CredentialVerifier for BasicVerifier {
    async fn verify(&self, req: &HttpRequest) -> Result<Account, AuthError> {
        extract_basic_auth(req, |username, password| {
            self.verify_credentials(username, password)
        })
        .ok_or(AuthError::Unauthorized)
    }
}
