//! Common test utilities and configuration.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{test, App};
use async_trait::async_trait;
use base64::prelude::*;

use keygate::resources::{KeyIssuer, SessionView, UserFields, UserView};
use keygate::security::{
    Account, AccountRepository, ApiKeyRepository, ApiKeyVerifier, BasicVerifier, FacebookGraph,
    FacebookProfile, FacebookVerifier, GraphError, InMemoryAccountRepository,
    InMemoryApiKeyRepository,
};

// =============================================================================
// Test Configuration
// =============================================================================

/// Creates the account store shared by the integration tests.
///
/// Accounts:
/// - alice:secret (alice@example.com)
/// - bob:hunter2 (bob@example.com)
/// - mallory:pwned (inactive)
pub fn seed_accounts() -> Arc<InMemoryAccountRepository> {
    Arc::new(
        InMemoryAccountRepository::new()
            .with_account(
                Account::new(1, "alice", "secret")
                    .email("alice@example.com")
                    .first_name("Alice")
                    .last_name("Liddell"),
            )
            .with_account(
                Account::new(2, "bob", "hunter2")
                    .email("bob@example.com")
                    .first_name("Bob"),
            )
            .with_account(
                Account::new(3, "mallory", "pwned")
                    .email("mallory@example.com")
                    .active(false),
            ),
    )
}

/// Creates an empty key store.
pub fn empty_keys() -> Arc<InMemoryApiKeyRepository> {
    Arc::new(InMemoryApiKeyRepository::new())
}

/// Stub Graph API: a fixed token-to-profile table; unknown tokens get the
/// status the real API answers for invalid tokens.
pub struct StubGraph {
    profiles: HashMap<String, FacebookProfile>,
}

impl StubGraph {
    pub fn new() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "fb-alice-token".to_string(),
            FacebookProfile {
                id: "fb-1001".into(),
                name: Some("Alice Liddell".into()),
                email: Some("alice@example.com".into()),
            },
        );
        profiles.insert(
            "fb-noemail-token".to_string(),
            FacebookProfile {
                id: "fb-1002".into(),
                name: Some("No Email".into()),
                email: None,
            },
        );
        profiles.insert(
            "fb-stranger-token".to_string(),
            FacebookProfile {
                id: "fb-1003".into(),
                name: Some("Stranger".into()),
                email: Some("stranger@example.com".into()),
            },
        );
        Self { profiles }
    }
}

#[async_trait(?Send)]
impl FacebookGraph for StubGraph {
    async fn fetch_profile(&self, access_token: &str) -> Result<FacebookProfile, GraphError> {
        self.profiles
            .get(access_token)
            .cloned()
            .ok_or(GraphError::Status(400))
    }
}

// =============================================================================
// App Builder
// =============================================================================

/// Builds the full service over the given stores with the default field
/// whitelist.
pub async fn init_app(
    accounts: Arc<InMemoryAccountRepository>,
    keys: Arc<InMemoryApiKeyRepository>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    init_app_with_fields(accounts, keys, UserFields::default()).await
}

/// Builds the full service with a custom field whitelist.
pub async fn init_app_with_fields(
    accounts: Arc<InMemoryAccountRepository>,
    keys: Arc<InMemoryApiKeyRepository>,
    fields: UserFields,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let accounts: Arc<dyn AccountRepository> = accounts;
    let keys: Arc<dyn ApiKeyRepository> = keys;
    let key_auth = Arc::new(ApiKeyVerifier::new(keys.clone(), accounts.clone()));
    let basic = Arc::new(BasicVerifier::new(accounts.clone()));
    let facebook = Arc::new(FacebookVerifier::new(
        Arc::new(StubGraph::new()),
        accounts.clone(),
    ));

    test::init_service(
        App::new()
            .service(
                UserView::new(accounts.clone(), key_auth.clone())
                    .fields(fields.clone())
                    .scope(),
            )
            .service(
                SessionView::new(keys.clone(), accounts.clone(), key_auth.clone())
                    .fields(fields.clone())
                    .scope(),
            )
            .service(
                KeyIssuer::new(keys.clone(), basic)
                    .fields(fields.clone())
                    .scope("/authenticate"),
            )
            .service(
                KeyIssuer::new(keys.clone(), facebook)
                    .fields(fields)
                    .get_scope("/fb_authenticate"),
            ),
    )
    .await
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Creates an HTTP Basic auth header value.
pub fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", BASE64_STANDARD.encode(credentials))
}

// =============================================================================
// Assertions
// =============================================================================

pub mod assert {
    use actix_web::body::MessageBody;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;

    pub fn status<B: MessageBody>(response: &ServiceResponse<B>, expected: StatusCode) {
        assert_eq!(
            response.status(),
            expected,
            "Expected status {}, got {}",
            expected,
            response.status()
        );
    }

    pub fn ok<B: MessageBody>(response: &ServiceResponse<B>) {
        status(response, StatusCode::OK);
    }

    pub fn created<B: MessageBody>(response: &ServiceResponse<B>) {
        status(response, StatusCode::CREATED);
    }

    pub fn no_content<B: MessageBody>(response: &ServiceResponse<B>) {
        status(response, StatusCode::NO_CONTENT);
    }

    pub fn unauthorized<B: MessageBody>(response: &ServiceResponse<B>) {
        status(response, StatusCode::UNAUTHORIZED);
    }

    pub fn not_found<B: MessageBody>(response: &ServiceResponse<B>) {
        status(response, StatusCode::NOT_FOUND);
    }

    pub fn method_not_allowed<B: MessageBody>(response: &ServiceResponse<B>) {
        status(response, StatusCode::METHOD_NOT_ALLOWED);
    }
}
