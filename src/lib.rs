//! # keygate
//!
//! API-key issuance and session endpoints for Actix Web.
//!
//! A client authenticates once — with primary username+secret credentials
//! or a Facebook OAuth2 access token — and receives an opaque API key
//! bound to its account. The key authenticates every later request until
//! the client deletes its session.
//!
//! ## Endpoints
//!
//! | Method | Path | Auth | Behavior |
//! |--------|------|------|----------|
//! | GET | `/user/`, `/user/{id}/` | API key | read-only accounts, whitelisted fields |
//! | GET | `/sessions/{id}/` | API key | key + embedded owner |
//! | DELETE | `/sessions/{id}/` | API key | invalidates the key |
//! | POST | `/authenticate/` | Basic | get-or-create key, returns `key` |
//! | GET | `/authenticate/` | Basic | get-or-create key, returns `api_key` |
//! | GET | `/fb_authenticate/` | OAuth2 bearer token | same, verified via the Graph API |
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use actix_web::{App, HttpServer};
//! use keygate::resources::{KeyIssuer, SessionView, UserView};
//! use keygate::security::{
//!     Account, ApiKeyVerifier, BasicVerifier, InMemoryAccountRepository,
//!     InMemoryApiKeyRepository,
//! };
//!
//! let accounts = Arc::new(
//!     InMemoryAccountRepository::new()
//!         .with_account(Account::new(1, "alice", "secret")),
//! );
//! let keys = Arc::new(InMemoryApiKeyRepository::new());
//!
//! HttpServer::new(move || {
//!     let key_auth = Arc::new(ApiKeyVerifier::new(keys.clone(), accounts.clone()));
//!     let basic = Arc::new(BasicVerifier::new(accounts.clone()));
//!     App::new()
//!         .service(UserView::new(accounts.clone(), key_auth.clone()).scope())
//!         .service(SessionView::new(keys.clone(), accounts.clone(), key_auth.clone()).scope())
//!         .service(KeyIssuer::new(keys.clone(), basic).scope("/authenticate"))
//! })
//! .bind("127.0.0.1:8080")?
//! .run()
//! .await
//! ```

pub mod error;
pub mod resources;
pub mod security;

pub use error::AuthError;
