use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Default access token lifetime.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 4;

/// A freshly signed token together with the claims inside it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Mints signed, time-bounded access tokens.
pub struct TokenIssuer {
    handler: Arc<JwtHandler>,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer.
    ///
    /// # Errors
    /// * `InvalidLifetime` - Lifetime is zero or negative, so every token
    ///   would be born expired
    pub fn new(
        handler: Arc<JwtHandler>,
        lifetime: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, JwtError> {
        if lifetime <= Duration::zero() {
            return Err(JwtError::InvalidLifetime(format!(
                "{} is not a positive duration",
                lifetime
            )));
        }

        Ok(Self {
            handler,
            lifetime,
            clock,
        })
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for an identity.
    ///
    /// # Arguments
    /// * `reference` - Identity reference (`sub`)
    /// * `email` - Contact identifier
    ///
    /// # Returns
    /// Signed token expiring `lifetime` from now
    ///
    /// # Errors
    /// * `InvalidLifetime` - Expiry cannot be represented
    /// * `EncodingFailed` - Signing failed; no token is produced
    pub fn issue(&self, reference: &str, email: &str) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_identity(reference, email, self.clock.now(), self.lifetime)?;
        let token = self.handler.encode(&claims)?;

        tracing::debug!(
            sub = %claims.sub,
            jti = %claims.jti,
            exp = claims.exp,
            "Access token issued"
        );

        Ok(IssuedToken { token, claims })
    }
}
