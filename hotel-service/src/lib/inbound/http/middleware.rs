use auth::CredentialStore;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;
use http::HeaderMap;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Header carrying the access token.
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Identity of the caller, stored in request extensions once the gate admits
/// the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub claims: auth::Claims,
}

/// Middleware that admits a request only with a valid, unexpired, unrevoked
/// token and adds the caller's identity to the request extensions.
///
/// Every rejection answers 401 with the same body; the reason is only
/// logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = state
        .authenticator
        .authenticate(extract_token(req.headers()))?;

    let user_id = UserId::from_string(&claims.sub)
        .map_err(|e| auth::AuthError::Malformed(format!("subject is not a user id: {}", e)))?;

    if state.refresh_identity {
        let identity = state.credentials.find_by_reference(&claims.sub).await;
        match identity {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!(sub = %claims.sub, "Token subject no longer exists");
                return Err(ApiError::Unauthorized("unauthorized".to_string()));
            }
            Err(e) => return Err(auth::AuthError::from(e).into()),
        }
    }

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email.clone(),
        claims,
    });

    Ok(next.run(req).await)
}

/// Token from `X-Api-Token`, or else from an `Authorization: Bearer` header.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers.get(API_TOKEN_HEADER) {
        return value.to_str().ok();
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn test_extract_token_prefers_api_token_header() {
        let mut headers = HeaderMap::new();
        headers.insert(API_TOKEN_HEADER, HeaderValue::from_static("abc"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));

        assert_eq!(extract_token(&headers), Some("abc"));
    }

    #[test]
    fn test_extract_token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));

        assert_eq!(extract_token(&headers), Some("xyz"));
    }

    #[test]
    fn test_extract_token_ignores_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

        assert_eq!(extract_token(&headers), None);
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
