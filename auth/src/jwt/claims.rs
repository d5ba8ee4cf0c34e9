use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Claims carried by an access token.
///
/// Every field is required on decode; a token missing one, or carrying one
/// with the wrong JSON type, does not deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity reference)
    pub sub: String,

    /// Contact identifier the identity logs in with
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl Claims {
    /// Create claims for an identity.
    ///
    /// # Arguments
    /// * `reference` - Unique identity reference (`sub`)
    /// * `email` - Contact identifier
    /// * `issued_at` - Current time
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Claims with a fresh `jti`
    ///
    /// # Errors
    /// * `InvalidLifetime` - Expiry falls outside the representable range
    pub fn for_identity(
        reference: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::InvalidLifetime(format!("{} overflows the expiry timestamp", lifetime))
        })?;

        Ok(Self {
            sub: reference.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Check if token is expired.
    ///
    /// A token is still valid during the second named by `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}
