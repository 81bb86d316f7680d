//! Session view: a key together with its owning account.

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse, Scope};
use serde_json::{json, Value};

use crate::error::AuthError;
use crate::security::account::{Account, AccountRepository};
use crate::security::api_key::{ApiKey, ApiKeyRepository};
use crate::security::verifier::CredentialVerifier;

use super::{method_not_allowed, ListParams, DEFAULT_LIMIT};

/// Which name the serialized bundle uses for the key value.
///
/// The GET-style issuance endpoints expose the key as `api_key` for
/// naming consistency with the query parameter the key verifier accepts;
/// the POST endpoint and the session view keep the internal name `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    /// Serialize the key under `"key"`.
    Internal,
    /// Serialize the key under `"api_key"`.
    External,
}

impl KeyField {
    fn name(self) -> &'static str {
        match self {
            KeyField::Internal => "key",
            KeyField::External => "api_key",
        }
    }
}

/// A key viewed together with its owning account, ready for
/// serialization. Output shaping (key field name, resource URI) is
/// explicit here rather than patched into the response afterwards.
pub struct SessionBundle<'a> {
    key: &'a ApiKey,
    user: &'a Account,
}

impl<'a> SessionBundle<'a> {
    /// Pairs a key with its owner.
    pub fn new(key: &'a ApiKey, user: &'a Account) -> Self {
        Self { key, user }
    }

    /// Returns the canonical URI of the session.
    pub fn resource_uri(&self) -> String {
        format!("/sessions/{}/", self.key.get_id())
    }

    /// Serializes the bundle: the embedded user restricted to the
    /// whitelist, the key value under the chosen field name, and
    /// optionally the session's resource URI.
    pub fn to_json(
        &self,
        fields: &super::UserFields,
        key_field: KeyField,
        include_resource_uri: bool,
    ) -> Value {
        let mut bundle = json!({
            "user": fields.represent(self.user),
        });
        bundle[key_field.name()] = json!(self.key.get_key());
        if include_resource_uri {
            bundle["resource_uri"] = json!(self.resource_uri());
        }
        bundle
    }
}

/// The `/sessions/` resource: GET returns keys with their embedded
/// owners, DELETE on a detail path invalidates the key.
pub struct SessionView {
    keys: Arc<dyn ApiKeyRepository>,
    accounts: Arc<dyn AccountRepository>,
    verifier: Arc<dyn CredentialVerifier>,
    fields: super::UserFields,
}

impl SessionView {
    /// Creates the view, protected by the given verifier (the API-key
    /// verifier in the default wiring).
    pub fn new(
        keys: Arc<dyn ApiKeyRepository>,
        accounts: Arc<dyn AccountRepository>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            keys,
            accounts,
            verifier,
            fields: super::UserFields::default(),
        }
    }

    /// Sets the field whitelist for the embedded user.
    pub fn fields(mut self, fields: super::UserFields) -> Self {
        self.fields = fields;
        self
    }

    /// Builds the `/sessions` scope: GET on the list path, GET and DELETE
    /// on the detail path, 405 otherwise.
    pub fn scope(self) -> Scope {
        web::scope("/sessions")
            .app_data(web::Data::new(self))
            .service(
                web::resource("/")
                    .route(web::get().to(list))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(detail))
                    .route(web::delete().to(delete))
                    .default_service(web::route().to(method_not_allowed)),
            )
    }
}

async fn list(
    req: HttpRequest,
    view: web::Data<SessionView>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AuthError> {
    view.verifier.verify(&req).await?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let keys = view.keys.all();
    let objects: Vec<Value> = keys
        .iter()
        .skip(offset)
        .take(limit)
        .filter_map(|key| {
            let account = view.accounts.find_by_id(key.get_account_id())?;
            Some(SessionBundle::new(key, &account).to_json(
                &view.fields,
                KeyField::Internal,
                true,
            ))
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "meta": {
            "limit": limit,
            "offset": offset,
            "total_count": keys.len(),
        },
        "objects": objects,
    })))
}

async fn detail(
    req: HttpRequest,
    view: web::Data<SessionView>,
    path: web::Path<String>,
) -> Result<HttpResponse, AuthError> {
    view.verifier.verify(&req).await?;

    let id: u64 = path.parse().map_err(|_| AuthError::NotFound)?;
    let key = view.keys.find_by_id(id).ok_or(AuthError::NotFound)?;
    let account = view
        .accounts
        .find_by_id(key.get_account_id())
        .ok_or(AuthError::NotFound)?;

    let bundle = SessionBundle::new(&key, &account);
    Ok(HttpResponse::Ok().json(bundle.to_json(&view.fields, KeyField::Internal, true)))
}

async fn delete(
    req: HttpRequest,
    view: web::Data<SessionView>,
    path: web::Path<String>,
) -> Result<HttpResponse, AuthError> {
    view.verifier.verify(&req).await?;

    let id: u64 = path.parse().map_err(|_| AuthError::NotFound)?;
    let removed = view.keys.remove(id).ok_or(AuthError::NotFound)?;
    log::info!(
        "session {} invalidated for account {}",
        id,
        removed.get_account_id()
    );

    Ok(HttpResponse::NoContent().finish())
}
