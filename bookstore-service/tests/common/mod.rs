use std::sync::Arc;

use auth::Authenticator;
use auth::SigningConfig;
use bookstore_service::domain::principal::service::AuthService;
use bookstore_service::inbound::http::router::create_router;
use bookstore_service::outbound::repositories::InMemoryPrincipalRepository;
use chrono::Duration;
use serde_json::json;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by an in-memory store
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryPrincipalRepository>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application with a 30 minute token lifetime
    pub async fn spawn() -> Self {
        Self::spawn_with_ttl(Duration::minutes(30)).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_ttl(token_ttl: Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let signing = SigningConfig::new("HS256", JWT_SECRET).expect("Invalid signing config");
        let authenticator = Arc::new(Authenticator::new(&signing, token_ttl));
        let repository = Arc::new(InMemoryPrincipalRepository::new());

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a principal through the API
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/users")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in through the API
    pub async fn login(&self, identifier: &str, secret: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({
                "identifier": identifier,
                "secret": secret
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the issued token, panicking on failure
    pub async fn login_token(&self, identifier: &str, secret: &str) -> String {
        let response = self.login(identifier, secret).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in response")
            .to_string()
    }
}
