use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer access token and adds the user to
/// request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = auth::extract_bearer(req.headers()).map_err(|e| {
        tracing::warn!(error = %e, "Rejected Authorization header");
        ApiError::unauthorized().into_response()
    })?;

    let user_id = state.authenticator.validate_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        ApiError::unauthorized().into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId::from(user_id),
    });

    Ok(next.run(req).await)
}

/// Middleware that counts requests to the static file server
pub async fn count_fileserver_hits(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    state.metrics.record_fileserver_hit();
    next.run(req).await
}
