use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing key is missing or empty")]
    MissingSigningKey,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token lifetime is invalid: {0}")]
    InvalidLifetime(String),

    #[error("Token signature or algorithm is invalid: {0}")]
    InvalidSignature(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token has been revoked")]
    Revoked,
}
