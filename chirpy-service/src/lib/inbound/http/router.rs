use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin;
use super::handlers::chirps::create_chirp;
use super::handlers::chirps::delete_chirp;
use super::handlers::chirps::get_chirp;
use super::handlers::chirps::list_chirps;
use super::handlers::health::healthz;
use super::handlers::sessions::login;
use super::handlers::sessions::refresh;
use super::handlers::sessions::revoke;
use super::handlers::users::create_user;
use super::handlers::users::update_user;
use super::handlers::webhooks::polka_webhook;
use super::metrics::ApiMetrics;
use super::middleware::authenticate as auth_middleware;
use super::middleware::count_fileserver_hits;
use crate::config::Platform;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub chirp_service: Arc<dyn ChirpServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub metrics: Arc<ApiMetrics>,
    pub platform: Platform,
    pub polka_api_key: Arc<str>,
}

pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let public_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/admin/metrics", get(admin::metrics))
        .route("/admin/reset", post(admin::reset))
        .route("/api/users", post(create_user))
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke))
        .route("/api/chirps", get(list_chirps))
        .route("/api/chirps/:chirp_id", get(get_chirp))
        .route("/api/polka/webhooks", post(polka_webhook));

    let protected_routes = Router::new()
        .route("/api/users", put(update_user))
        .route("/api/chirps", post(create_chirp))
        .route("/api/chirps/:chirp_id", delete(delete_chirp))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let static_routes = Router::new()
        .nest_service("/app", ServeDir::new(static_dir))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            count_fileserver_hits,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(static_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use http::header::AUTHORIZATION;
    use http::header::CONTENT_TYPE;
    use http::Method;
    use http::StatusCode;
    use mockall::mock;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::chirp::errors::ChirpError;
    use crate::domain::chirp::models::Chirp;
    use crate::domain::chirp::models::ChirpId;
    use crate::domain::chirp::models::CreateChirpCommand;
    use crate::domain::chirp::models::ListChirpsQuery;
    use crate::domain::session::errors::SessionError;
    use crate::domain::session::models::LoginCommand;
    use crate::domain::session::models::Session;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::CreateUserCommand;
    use crate::domain::user::models::UpdateUserCommand;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub Users {}

        #[async_trait]
        impl UserServicePort for Users {
            async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;
            async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
            async fn update_user(&self, id: &UserId, command: UpdateUserCommand) -> Result<User, UserError>;
            async fn upgrade_user(&self, id: &UserId) -> Result<User, UserError>;
            async fn reset(&self) -> Result<(), UserError>;
        }
    }

    mock! {
        pub Chirps {}

        #[async_trait]
        impl ChirpServicePort for Chirps {
            async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError>;
            async fn get_chirp(&self, id: ChirpId) -> Result<Chirp, ChirpError>;
            async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError>;
            async fn delete_chirp(&self, id: ChirpId, requester: UserId) -> Result<(), ChirpError>;
        }
    }

    mock! {
        pub Sessions {}

        #[async_trait]
        impl SessionServicePort for Sessions {
            async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;
            async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;
            async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;
        }
    }

    fn state_with(users: MockUsers, chirps: MockChirps, platform: Platform) -> AppState {
        AppState {
            user_service: Arc::new(users),
            chirp_service: Arc::new(chirps),
            session_service: Arc::new(MockSessions::new()),
            authenticator: Arc::new(Authenticator::new(SECRET)),
            metrics: Arc::new(ApiMetrics::new()),
            platform,
            polka_api_key: Arc::from("polka-key"),
        }
    }

    fn router(state: AppState) -> Router {
        create_router(state, ".")
    }

    fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let state = state_with(MockUsers::new(), MockChirps::new(), Platform::Dev);

        let response = router(state)
            .oneshot(request(Method::GET, "/api/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn test_protected_route_without_token() {
        let mut chirps = MockChirps::new();
        chirps.expect_create_chirp().times(0);
        let state = state_with(MockUsers::new(), chirps, Platform::Dev);

        let response = router(state)
            .oneshot(
                request(Method::POST, "/api/chirps")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"body":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_chirp_passes_token_subject() {
        let author = UserId::new();
        let token = Authenticator::new(SECRET)
            .issue_access_token(author.0, chrono::Duration::minutes(5))
            .unwrap();

        let mut chirps = MockChirps::new();
        chirps
            .expect_create_chirp()
            .withf(move |command| command.author_id == author && command.body.as_str() == "hi ****")
            .times(1)
            .returning(|command| {
                let now = chrono::Utc::now();
                Ok(Chirp {
                    id: ChirpId::new(),
                    body: command.body,
                    user_id: command.author_id,
                    created_at: now,
                    updated_at: now,
                })
            });
        let state = state_with(MockUsers::new(), chirps, Platform::Dev);

        let response = router(state)
            .oneshot(
                request(Method::POST, "/api/chirps")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"body":"hi sharbert"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_list_chirps_rejects_unknown_sort() {
        let mut chirps = MockChirps::new();
        chirps.expect_list_chirps().times(0);
        let state = state_with(MockUsers::new(), chirps, Platform::Dev);

        let response = router(state)
            .oneshot(
                request(Method::GET, "/api/chirps?sort=up")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_outside_dev() {
        let mut users = MockUsers::new();
        users.expect_reset().times(0);
        let state = state_with(users, MockChirps::new(), Platform::Other);

        let response = router(state)
            .oneshot(request(Method::POST, "/admin/reset").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_webhook_wrong_key() {
        let mut users = MockUsers::new();
        users.expect_upgrade_user().times(0);
        let state = state_with(users, MockChirps::new(), Platform::Dev);

        let response = router(state)
            .oneshot(
                request(Method::POST, "/api/polka/webhooks")
                    .header(AUTHORIZATION, "ApiKey not-the-key")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"event":"user.upgraded","data":{"user_id":"3b1c5e0a-6f8e-4b5e-9a3c-2d9f1e7c4a11"}}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
