use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::router::AppState;

/// Exchange an email and password for an access token.
///
/// Unknown emails and wrong passwords produce the same 401 response.
pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let Json(body) = body?;
    let login = state
        .authenticator
        .login(state.credentials.as_ref(), &body.email, &body.password)
        .await?;

    tracing::info!(user_id = %login.identity.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            user: (&login.identity).into(),
            token: login.token.token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub user: UserData,
    pub token: String,
}
