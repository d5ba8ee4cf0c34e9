use thiserror::Error;

use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::store::StoreError;

const INVALID_CREDENTIALS: &str = "invalid credentials";
const UNAUTHORIZED: &str = "unauthorized";
const INTERNAL: &str = "internal server error";

/// Authentication operation errors.
///
/// The `Display` text carries the detailed reason and is meant for logs.
/// Anything sent to a client goes through [`AuthError::public_message`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No token supplied")]
    MissingToken,

    #[error("Invalid token signature: {0}")]
    InvalidSignature(String),

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Password error: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Token signing error: {0}")]
    Signing(JwtError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// True for failures that must be answered with 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::InvalidSignature(_)
                | AuthError::Malformed(_)
                | AuthError::Expired
                | AuthError::Revoked
        )
    }

    /// Message safe to return to a client.
    ///
    /// Login failures share one text whether the identifier exists or not,
    /// gate failures share another, and configuration or backend faults
    /// reveal nothing.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => INVALID_CREDENTIALS,
            AuthError::MissingToken
            | AuthError::InvalidSignature(_)
            | AuthError::Malformed(_)
            | AuthError::Expired
            | AuthError::Revoked => UNAUTHORIZED,
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Store(_) => INTERNAL,
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidSignature(reason) => AuthError::InvalidSignature(reason),
            JwtError::Malformed(reason) => AuthError::Malformed(reason),
            JwtError::Expired => AuthError::Expired,
            JwtError::Revoked => AuthError::Revoked,
            JwtError::MissingSigningKey
            | JwtError::EncodingFailed(_)
            | JwtError::InvalidLifetime(_) => AuthError::Signing(err),
        }
    }
}
