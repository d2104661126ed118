#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chirpy_service::chirp::errors::ChirpError;
use chirpy_service::chirp::models::Chirp;
use chirpy_service::chirp::models::ChirpId;
use chirpy_service::chirp::models::ListChirpsQuery;
use chirpy_service::chirp::models::SortDirection;
use chirpy_service::chirp::ports::ChirpRepository;
use chirpy_service::chirp::service::ChirpService;
use chirpy_service::config::Platform;
use chirpy_service::inbound::http::metrics::ApiMetrics;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chirpy_service::session::errors::SessionError;
use chirpy_service::session::models::RefreshToken;
use chirpy_service::session::ports::RefreshTokenRepository;
use chirpy_service::session::service::SessionService;
use chirpy_service::session::service::SessionSettings;
use chirpy_service::user::errors::UserError;
use chirpy_service::user::models::EmailAddress;
use chirpy_service::user::models::User;
use chirpy_service::user::models::UserId;
use chirpy_service::user::ports::UserRepository;
use chirpy_service::user::service::UserService;
use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// In-memory store backing every repository port.
///
/// Deleting users cascades to their chirps and refresh tokens, like the
/// foreign keys of the SQL schema.
#[derive(Default)]
pub struct InMemoryStore {
    pub users: DashMap<UserId, User>,
    pub chirps: DashMap<ChirpId, Chirp>,
    pub refresh_tokens: DashMap<String, RefreshToken>,
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        if self.users.iter().any(|entry| entry.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.email == *email)
            .map(|entry| entry.value().clone()))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        if self
            .users
            .iter()
            .any(|entry| entry.email == user.email && entry.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        match self.users.get_mut(&user.id) {
            Some(mut entry) => {
                *entry = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn set_chirpy_red(
        &self,
        id: &UserId,
        is_chirpy_red: bool,
    ) -> Result<Option<User>, UserError> {
        Ok(self.users.get_mut(id).map(|mut entry| {
            entry.is_chirpy_red = is_chirpy_red;
            entry.updated_at = Utc::now();
            entry.value().clone()
        }))
    }

    async fn delete_all(&self) -> Result<(), UserError> {
        self.users.clear();
        self.chirps.clear();
        self.refresh_tokens.clear();
        Ok(())
    }
}

#[async_trait]
impl ChirpRepository for InMemoryStore {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.chirps.insert(chirp.id, chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self.chirps.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps: Vec<Chirp> = self
            .chirps
            .iter()
            .filter(|entry| query.author_id.map_or(true, |author| entry.user_id == author))
            .map(|entry| entry.value().clone())
            .collect();

        chirps.sort_by_key(|chirp| chirp.created_at);
        if query.sort == SortDirection::Desc {
            chirps.reverse();
        }

        Ok(chirps)
    }

    async fn delete(&self, id: ChirpId) -> Result<(), ChirpError> {
        self.chirps
            .remove(&id)
            .map(|_| ())
            .ok_or(ChirpError::NotFound(id))
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryStore {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError> {
        self.refresh_tokens
            .insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, SessionError> {
        Ok(self.refresh_tokens.get(token).map(|entry| entry.value().clone()))
    }

    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool, SessionError> {
        Ok(match self.refresh_tokens.get_mut(token) {
            Some(mut entry) => {
                entry.revoked_at.get_or_insert(at);
                entry.updated_at = at;
                true
            }
            None => false,
        })
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub metrics: Arc<ApiMetrics>,
}

impl TestApp {
    /// Spawn the application on the `dev` platform
    pub async fn spawn() -> Self {
        Self::spawn_on(Platform::Dev).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on(platform: Platform) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));
        let metrics = Arc::new(ApiMetrics::new());

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&store),
                Arc::clone(&authenticator),
            )),
            chirp_service: Arc::new(ChirpService::new(Arc::clone(&store))),
            session_service: Arc::new(SessionService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&authenticator),
                SessionSettings::default(),
            )),
            authenticator: Arc::clone(&authenticator),
            metrics: Arc::clone(&metrics),
            platform,
            polka_api_key: Arc::from(POLKA_KEY),
        };

        let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/static");
        let router = create_router(state, static_dir);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            api_client: reqwest::Client::new(),
            authenticator,
            metrics,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Register a user and return the response body
    pub async fn create_user(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the response body (user, token, refresh_token)
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Register and log in, returning `(user_id, access_token, refresh_token)`
    pub async fn signed_up_user(&self, email: &str) -> (String, String, String) {
        self.create_user(email, "04234").await;
        let session = self.login(email, "04234").await;
        (
            session["id"].as_str().unwrap().to_string(),
            session["token"].as_str().unwrap().to_string(),
            session["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Post a chirp as the bearer of `token`
    pub async fn post_chirp(&self, token: &str, body: &str) -> reqwest::Response {
        self.post("/api/chirps")
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
