use std::sync::Arc;
use std::time::Duration;

use auth::Argon2Hasher;
use auth::ManualClock;
use auth::TokenIssuer;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::password::Argon2PasswordVerifier;
use auth_service::outbound::repositories::InMemoryCredentialStore;
use chrono::TimeZone;
use chrono::Utc;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-64-bytes-long-for-hs512";
pub const TOKEN_VALIDITY: Duration = Duration::from_secs(60 * 60);

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub store: InMemoryCredentialStore,
    pub clock: Arc<ManualClock>,
    pub token_issuer: Arc<TokenIssuer>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = InMemoryCredentialStore::new();
        let clock = Arc::new(ManualClock::new(
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        ));
        let token_issuer = Arc::new(
            TokenIssuer::with_clock(TEST_SECRET, TOKEN_VALIDITY, clock.clone())
                .expect("Failed to create token issuer"),
        );

        // Cheap Argon2 parameters keep the suite fast
        let password_verifier = Arc::new(Argon2PasswordVerifier::new(
            Argon2Hasher::with_params(1024, 1, 1).expect("Failed to create hasher"),
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::new(store.clone()),
            password_verifier,
            token_issuer.clone(),
        ));

        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            store,
            clock,
            token_issuer,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user through the API
    pub async fn sign_up(&self, username: &str, password: &str, roles: &[&str]) -> reqwest::Response {
        self.post("/signup")
            .json(&json!({
                "username": username,
                "password": password,
                "roles": roles,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign in through the API
    pub async fn sign_in(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/signin")
            .json(&json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign in and return the issued token, panicking on failure
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        let response = self.sign_in(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in response")
            .to_string()
    }
}
