//! Demo server with an in-memory account store.
//!
//! # Run
//! ```bash
//! cargo run
//! ```
//!
//! # Test
//! ```bash
//! # Issue a key with primary credentials
//! curl -u alice:secret -X POST http://127.0.0.1:8080/authenticate/
//!
//! # Same, over GET (key comes back as "api_key")
//! curl -u alice:secret http://127.0.0.1:8080/authenticate/
//!
//! # Use the key
//! curl -H "X-API-Key: <key>" http://127.0.0.1:8080/user/
//!
//! # Drop the session
//! curl -H "X-API-Key: <key>" -X DELETE http://127.0.0.1:8080/sessions/1/
//! ```

use std::sync::Arc;

use actix_web::{App, HttpServer};

use keygate::resources::{KeyIssuer, SessionView, UserView};
use keygate::security::{
    Account, ApiKeyVerifier, BasicVerifier, FacebookVerifier, GraphApiClient,
    InMemoryAccountRepository, InMemoryApiKeyRepository,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let addr = std::env::var("KEYGATE_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let accounts = Arc::new(
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
            ),
    );
    let keys = Arc::new(InMemoryApiKeyRepository::new());
    let graph = Arc::new(GraphApiClient::new());

    println!("=== keygate ===");
    println!("Server running at http://{}", addr);
    println!();
    println!("Demo accounts:");
    println!("  alice:secret   (alice@example.com)");
    println!("  bob:hunter2    (bob@example.com)");
    println!();
    println!("Try:");
    println!("  curl -u alice:secret -X POST http://{}/authenticate/", addr);
    println!("  curl -u alice:secret http://{}/authenticate/", addr);
    println!("  curl -H 'X-API-Key: <key>' http://{}/user/", addr);
    println!("  curl -H 'X-API-Key: <key>' -X DELETE http://{}/sessions/1/", addr);
    println!();

    HttpServer::new(move || {
        let key_auth = Arc::new(ApiKeyVerifier::new(keys.clone(), accounts.clone()));
        let basic = Arc::new(BasicVerifier::new(accounts.clone()));
        let facebook = Arc::new(FacebookVerifier::new(graph.clone(), accounts.clone()));

        App::new()
            .service(UserView::new(accounts.clone(), key_auth.clone()).scope())
            .service(SessionView::new(keys.clone(), accounts.clone(), key_auth.clone()).scope())
            .service(KeyIssuer::new(keys.clone(), basic).scope("/authenticate"))
            .service(KeyIssuer::new(keys.clone(), facebook).get_scope("/fb_authenticate"))
    })
    .bind(addr)?
    .run()
    .await
}
