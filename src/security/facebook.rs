//! Facebook OAuth2 token verification.
//!
//! The client performs the OAuth2 dance against Facebook on its own and
//! hits the issuance endpoint with the access token it was granted. This
//! module verifies that token server-side by asking the Graph API for the
//! token's profile, then maps the profile's email to a local account.
//!
//! The token must have been granted the `email` permission: a profile
//! without an email cannot be mapped to an account and is rejected.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;
use async_trait::async_trait;
use derive_more::Display;
use serde::Deserialize;

use crate::error::AuthError;
use crate::security::account::{Account, AccountRepository};
use crate::security::verifier::CredentialVerifier;

/// Default Graph API base URL.
pub const FACEBOOK_GRAPH_URL: &str = "https://graph.facebook.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the Graph API lookup.
#[derive(Debug, Display, Clone)]
pub enum GraphError {
    /// The HTTP request to the Graph API failed.
    #[display("graph request failed: {_0}")]
    Request(String),
    /// The Graph API answered with a non-success status (invalid or
    /// expired token, revoked permission, ...).
    #[display("graph responded with status {_0}")]
    Status(u16),
    /// The profile payload could not be decoded.
    #[display("graph profile decode failed: {_0}")]
    Decode(String),
}

impl std::error::Error for GraphError {}

/// Profile fields fetched for a verified token.
#[derive(Debug, Clone, Deserialize)]
pub struct FacebookProfile {
    /// Facebook user id.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Email address; present only when the token carries the `email`
    /// permission.
    pub email: Option<String>,
}

/// Trait for resolving an access token to its Facebook profile.
///
/// Production uses [`GraphApiClient`]; tests plug in a stub.
#[async_trait(?Send)]
pub trait FacebookGraph: Send + Sync {
    /// Fetches the profile the token belongs to.
    async fn fetch_profile(&self, access_token: &str) -> Result<FacebookProfile, GraphError>;
}

/// Graph API client over HTTP.
#[derive(Clone)]
pub struct GraphApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl GraphApiClient {
    /// Creates a client against the public Graph API.
    pub fn new() -> Self {
        Self::with_base_url(FACEBOOK_GRAPH_URL)
    }

    /// Creates a client against a custom base URL (test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

impl Default for GraphApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl FacebookGraph for GraphApiClient {
    async fn fetch_profile(&self, access_token: &str) -> Result<FacebookProfile, GraphError> {
        let response = self
            .http
            .get(format!("{}/me", self.base_url))
            .query(&[("fields", "id,name,email")])
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| GraphError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GraphError::Status(response.status().as_u16()));
        }

        response
            .json::<FacebookProfile>()
            .await
            .map_err(|e| GraphError::Decode(e.to_string()))
    }
}

/// Verifier that authenticates requests with a Facebook OAuth2 access
/// token and maps the verified profile to a local account by email.
pub struct FacebookVerifier {
    graph: Arc<dyn FacebookGraph>,
    accounts: Arc<dyn AccountRepository>,
}

impl FacebookVerifier {
    /// Creates a verifier using the given Graph client and account store.
    pub fn new(graph: Arc<dyn FacebookGraph>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { graph, accounts }
    }

    /// Extracts the access token from `Authorization: Bearer <token>` or
    /// the `access_token` query parameter.
    fn extract_token(req: &HttpRequest) -> Option<String> {
        if let Some(token) = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
        {
            return Some(token.to_string());
        }

        req.query_string().split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key == "access_token" {
                Some(urlencoding::decode(value).ok()?.into_owned())
            } else {
                None
            }
        })
    }
}

#[async_trait(?Send)]
impl CredentialVerifier for FacebookVerifier {
    async fn verify(&self, req: &HttpRequest) -> Result<Account, AuthError> {
        let token = Self::extract_token(req).ok_or(AuthError::Unauthorized)?;

        let profile = self.graph.fetch_profile(&token).await.map_err(|e| {
            log::debug!("facebook token verification failed: {}", e);
            AuthError::Unauthorized
        })?;

        let email = profile.email.as_deref().ok_or_else(|| {
            log::debug!(
                "facebook profile {} has no email; token lacks the email permission",
                profile.id
            );
            AuthError::Unauthorized
        })?;

        let account = self
            .accounts
            .find_by_email(email)
            .ok_or(AuthError::Unauthorized)?;

        if !account.is_active() {
            return Err(AuthError::Unauthorized);
        }

        Ok(account)
    }
}
