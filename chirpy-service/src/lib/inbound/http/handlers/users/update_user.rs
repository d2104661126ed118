use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating the caller (raw JSON).
///
/// Absent or empty fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let email = self
            .email
            .filter(|email| !email.is_empty())
            .map(EmailAddress::new)
            .transpose()?;

        let password = self.password.filter(|password| !password.is_empty());

        Ok(UpdateUserCommand { email, password })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .user_service
        .update_user(&caller.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_ignored() {
        let request = UpdateUserRequest {
            email: Some(String::new()),
            password: Some(String::new()),
        };
        let command = request.try_into_command().unwrap();
        assert!(command.email.is_none());
        assert!(command.password.is_none());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let request = UpdateUserRequest {
            email: Some("not-an-email".to_string()),
            password: None,
        };
        assert!(matches!(
            request.try_into_command(),
            Err(UserError::InvalidEmail(_))
        ));
    }
}
