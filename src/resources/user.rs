//! Read-only user view.

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse, Scope};
use serde_json::{json, Map, Value};

use crate::error::AuthError;
use crate::security::account::{Account, AccountRepository};
use crate::security::verifier::CredentialVerifier;

use super::{method_not_allowed, ListParams, DEFAULT_LIMIT};

/// Whitelist of account fields exposed by the user view.
///
/// The whitelist is the service's one external configuration point; it is
/// passed to the view at construction rather than read from global state.
/// Unknown field names are ignored, and the password is never exposed
/// regardless of configuration.
///
/// # Example
/// ```
/// use keygate::resources::UserFields;
///
/// let fields = UserFields::new(vec!["id", "username"]);
/// assert!(fields.contains("username"));
/// assert!(!fields.contains("email"));
/// ```
#[derive(Debug, Clone)]
pub struct UserFields {
    fields: Vec<String>,
}

impl Default for UserFields {
    fn default() -> Self {
        Self::new(vec!["id", "username", "first_name", "last_name", "email"])
    }
}

impl UserFields {
    /// Creates a whitelist from the given field names.
    pub fn new(fields: Vec<impl Into<String>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the field is whitelisted.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Builds the external representation of an account, restricted to
    /// the whitelisted fields.
    pub fn represent(&self, account: &Account) -> Value {
        let mut object = Map::new();
        for field in &self.fields {
            let value = match field.as_str() {
                "id" => json!(account.get_id()),
                "username" => json!(account.get_username()),
                "first_name" => json!(account.get_first_name()),
                "last_name" => json!(account.get_last_name()),
                "email" => json!(account.get_email()),
                "is_active" => json!(account.is_active()),
                _ => continue,
            };
            object.insert(field.clone(), value);
        }
        Value::Object(object)
    }
}

/// The `/user/` resource: key-protected, read-only list and detail of
/// accounts with whitelisted fields.
pub struct UserView {
    accounts: Arc<dyn AccountRepository>,
    verifier: Arc<dyn CredentialVerifier>,
    fields: UserFields,
}

impl UserView {
    /// Creates the view over an account store, protected by the given
    /// verifier (the API-key verifier in the default wiring), with the
    /// default field whitelist.
    pub fn new(accounts: Arc<dyn AccountRepository>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            accounts,
            verifier,
            fields: UserFields::default(),
        }
    }

    /// Sets the field whitelist.
    pub fn fields(mut self, fields: UserFields) -> Self {
        self.fields = fields;
        self
    }

    /// Builds the `/user/` scope: GET list, GET detail, 405 otherwise.
    pub fn scope(self) -> Scope {
        web::scope("/user")
            .app_data(web::Data::new(self))
            .service(
                web::resource("/")
                    .route(web::get().to(list))
                    .default_service(web::route().to(method_not_allowed)),
            )
            .service(
                web::resource("/{id}/")
                    .route(web::get().to(detail))
                    .default_service(web::route().to(method_not_allowed)),
            )
    }
}

async fn list(
    req: HttpRequest,
    view: web::Data<UserView>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AuthError> {
    view.verifier.verify(&req).await?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let accounts = view.accounts.all();
    let objects: Vec<Value> = accounts
        .iter()
        .skip(offset)
        .take(limit)
        .map(|a| view.fields.represent(a))
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "meta": {
            "limit": limit,
            "offset": offset,
            "total_count": accounts.len(),
        },
        "objects": objects,
    })))
}

async fn detail(
    req: HttpRequest,
    view: web::Data<UserView>,
    path: web::Path<String>,
) -> Result<HttpResponse, AuthError> {
    view.verifier.verify(&req).await?;

    let id: u64 = path.parse().map_err(|_| AuthError::NotFound)?;
    let account = view.accounts.find_by_id(id).ok_or(AuthError::NotFound)?;

    Ok(HttpResponse::Ok().json(view.fields.represent(&account)))
}
