//! Key-issuance endpoints.
//!
//! Each issuance endpoint authenticates the request with its configured
//! verifier and performs get-or-create of the account's key: repeated
//! calls return the same key value until the session view deletes it.
//!
//! The GET-style endpoints exist for clients that can only issue GET
//! cross-origin; since GET normally never creates, their collection route
//! is an explicit create-or-get and the detail route is disabled to
//! prevent key enumeration.

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse, Scope};

use crate::error::AuthError;
use crate::security::api_key::ApiKeyRepository;
use crate::security::verifier::CredentialVerifier;

use super::method_not_allowed;
use super::session::{KeyField, SessionBundle};
use super::user::UserFields;

/// An issuance endpoint: one verifier strategy, one key store.
///
/// The default wiring mounts one issuer with the Basic verifier at
/// `/authenticate` (POST and GET) and another with the Facebook verifier
/// at `/fb_authenticate` (GET only).
pub struct KeyIssuer {
    keys: Arc<dyn ApiKeyRepository>,
    verifier: Arc<dyn CredentialVerifier>,
    fields: UserFields,
}

impl KeyIssuer {
    /// Creates an issuer with the given key store and verifier.
    pub fn new(keys: Arc<dyn ApiKeyRepository>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            keys,
            verifier,
            fields: UserFields::default(),
        }
    }

    /// Sets the field whitelist for the embedded user.
    pub fn fields(mut self, fields: UserFields) -> Self {
        self.fields = fields;
        self
    }

    /// Builds an issuance scope accepting POST and GET on the collection
    /// path.
    pub fn scope(self, path: &str) -> Scope {
        self.build_scope(path, true)
    }

    /// Builds an issuance scope accepting only GET on the collection
    /// path.
    pub fn get_scope(self, path: &str) -> Scope {
        self.build_scope(path, false)
    }

    fn build_scope(self, path: &str, allow_post: bool) -> Scope {
        let mut collection = web::resource("/").route(web::get().to(create_get));
        if allow_post {
            collection = collection.route(web::post().to(create_post));
        }
        web::scope(path)
            .app_data(web::Data::new(self))
            .service(collection.default_service(web::route().to(method_not_allowed)))
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(fetch_forbidden))
                    .default_service(web::route().to(method_not_allowed)),
            )
    }
}

/// POST issuance: authenticate, get-or-create the key, return the full
/// bundle with the internal key name.
async fn create_post(
    req: HttpRequest,
    issuer: web::Data<KeyIssuer>,
) -> Result<HttpResponse, AuthError> {
    let account = issuer.verifier.verify(&req).await?;
    let key = issuer.keys.get_or_create(account.get_id());
    log::info!("session {} issued to {}", key.get_id(), account.get_username());

    let bundle = SessionBundle::new(&key, &account);
    Ok(HttpResponse::Created().json(bundle.to_json(&issuer.fields, KeyField::Internal, false)))
}

/// GET issuance: same get-or-create contract, but the key is exposed
/// under the external name `api_key`.
async fn create_get(
    req: HttpRequest,
    issuer: web::Data<KeyIssuer>,
) -> Result<HttpResponse, AuthError> {
    let account = issuer.verifier.verify(&req).await?;
    let key = issuer.keys.get_or_create(account.get_id());
    log::info!("session {} issued to {}", key.get_id(), account.get_username());

    let bundle = SessionBundle::new(&key, &account);
    Ok(HttpResponse::Ok().json(bundle.to_json(&issuer.fields, KeyField::External, false)))
}

/// Issuance endpoints are create-only; addressing a single key is
/// rejected outright so key ids cannot be probed.
async fn fetch_forbidden() -> Result<HttpResponse, AuthError> {
    Err(AuthError::Unauthorized)
}
