//! The credential-verification seam shared by every endpoint.

use actix_web::HttpRequest;
use async_trait::async_trait;

use crate::error::AuthError;
use crate::security::account::Account;

/// Strategy for validating a presented credential and resolving it to an
/// account.
///
/// Each endpoint is configured with exactly one verifier at construction:
/// the user and session views take the API-key verifier, the issuance
/// endpoints take the Basic or Facebook verifier. Verification either
/// yields the owning account or short-circuits the request with
/// `AuthError::Unauthorized`.
#[async_trait(?Send)]
pub trait CredentialVerifier: Send + Sync {
    /// Attempts to authenticate the request.
    async fn verify(&self, req: &HttpRequest) -> Result<Account, AuthError>;
}
