use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Revoke the token the request was admitted with.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    state.authenticator.revoke(&user.claims);

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "logged out".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
