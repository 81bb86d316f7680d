//! HTTP resource endpoints.
//!
//! # Module Structure
//!
//! - `user` - Read-only account view (`/user/`)
//! - `session` - Key+account view with deletion (`/sessions/{id}/`)
//! - `authenticate` - Key issuance (`/authenticate/`, `/fb_authenticate/`)
//!
//! Each resource is constructed with its stores, its verifier strategy
//! and its field whitelist, then mounted as an actix-web scope.

use actix_web::HttpResponse;
use serde::Deserialize;

use crate::error::AuthError;

pub use authenticate::KeyIssuer;
pub use session::{KeyField, SessionBundle, SessionView};
pub use user::{UserFields, UserView};

pub mod authenticate;
pub mod session;
pub mod user;

/// Default route for methods outside a resource's allow-list.
pub(crate) async fn method_not_allowed() -> Result<HttpResponse, AuthError> {
    Err(AuthError::MethodNotAllowed)
}

/// Default page size for list endpoints.
pub(crate) const DEFAULT_LIMIT: usize = 20;

/// Page-window query parameters shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}
