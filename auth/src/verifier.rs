use std::sync::Arc;

use crate::clock::Clock;
use crate::errors::AuthError;
use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::revocation::RevocationList;

/// Validates presented access tokens.
///
/// Checks run in a fixed order and stop at the first failure: presence,
/// algorithm and signature, claim decoding, expiry, revocation.
pub struct TokenVerifier {
    handler: Arc<JwtHandler>,
    clock: Arc<dyn Clock>,
    revocations: Arc<RevocationList>,
    leeway_seconds: i64,
}

impl TokenVerifier {
    pub fn new(
        handler: Arc<JwtHandler>,
        clock: Arc<dyn Clock>,
        revocations: Arc<RevocationList>,
    ) -> Self {
        Self {
            handler,
            clock,
            revocations,
            leeway_seconds: 0,
        }
    }

    /// Tolerate clock skew by accepting tokens up to `seconds` past expiry.
    pub fn with_leeway(mut self, seconds: i64) -> Self {
        self.leeway_seconds = seconds.max(0);
        self
    }

    /// Verify a raw token.
    ///
    /// # Arguments
    /// * `raw` - Token as presented by the client, if any
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `MissingToken` - No token, or an empty one
    /// * `InvalidSignature` - Wrong algorithm or signature mismatch
    /// * `Malformed` - Token or claims cannot be decoded
    /// * `Expired` - Current time is past `exp`
    /// * `Revoked` - Token id is on the deny-list
    pub fn verify(&self, raw: Option<&str>) -> Result<Claims, AuthError> {
        let token = raw
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims: Claims = self.handler.decode(token)?;

        let now = self.clock.now().timestamp();
        if claims.is_expired(now - self.leeway_seconds) {
            return Err(AuthError::Expired);
        }

        if self.revocations.is_revoked(&claims.jti, now) {
            return Err(AuthError::Revoked);
        }

        Ok(claims)
    }

    /// Put a verified token on the deny-list.
    pub fn revoke(&self, claims: &Claims) {
        let now = self.clock.now().timestamp();
        self.revocations.revoke(claims, now);
        tracing::info!(sub = %claims.sub, jti = %claims.jti, "Access token revoked");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::clock::ManualClock;
    use crate::jwt::SigningKey;

    const SECRET: &str = "test_secret_key_at_least_32_bytes!";

    struct Fixture {
        clock: Arc<ManualClock>,
        handler: Arc<JwtHandler>,
        verifier: TokenVerifier,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let handler = Arc::new(JwtHandler::new(&SigningKey::new(SECRET).unwrap()));
        let verifier = TokenVerifier::new(
            Arc::clone(&handler),
            clock.clone(),
            Arc::new(RevocationList::new()),
        );
        Fixture {
            clock,
            handler,
            verifier,
        }
    }

    fn token_for(fixture: &Fixture, lifetime: Duration) -> (String, Claims) {
        let claims =
            Claims::for_identity("user123", "alice@x.com", fixture.clock.now(), lifetime).unwrap();
        (fixture.handler.encode(&claims).unwrap(), claims)
    }

    #[test]
    fn test_valid_token() {
        let fixture = fixture();
        let (token, claims) = token_for(&fixture, Duration::hours(4));

        let verified = fixture.verifier.verify(Some(&token)).unwrap();
        assert_eq!(verified, claims);
    }

    #[test]
    fn test_missing_token() {
        let fixture = fixture();
        assert_eq!(fixture.verifier.verify(None), Err(AuthError::MissingToken));
        assert_eq!(fixture.verifier.verify(Some("")), Err(AuthError::MissingToken));
        assert_eq!(
            fixture.verifier.verify(Some("   ")),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn test_expired_token_with_valid_signature() {
        let fixture = fixture();
        let (token, _) = token_for(&fixture, Duration::hours(-1));

        assert_eq!(fixture.verifier.verify(Some(&token)), Err(AuthError::Expired));
    }

    #[test]
    fn test_expiry_boundary() {
        let fixture = fixture();
        let (token, _) = token_for(&fixture, Duration::hours(4));

        fixture.clock.advance(Duration::hours(4));
        assert!(fixture.verifier.verify(Some(&token)).is_ok());

        fixture.clock.advance(Duration::seconds(1));
        assert_eq!(fixture.verifier.verify(Some(&token)), Err(AuthError::Expired));
    }

    #[test]
    fn test_leeway() {
        let fixture = fixture();
        let (token, _) = token_for(&fixture, Duration::hours(4));
        let verifier = TokenVerifier::new(
            Arc::clone(&fixture.handler),
            fixture.clock.clone(),
            Arc::new(RevocationList::new()),
        )
        .with_leeway(30);

        fixture.clock.advance(Duration::hours(4) + Duration::seconds(30));
        assert!(verifier.verify(Some(&token)).is_ok());

        fixture.clock.advance(Duration::seconds(1));
        assert_eq!(verifier.verify(Some(&token)), Err(AuthError::Expired));
    }

    #[test]
    fn test_foreign_key() {
        let fixture = fixture();
        let other = JwtHandler::new(&SigningKey::new("another_secret_at_least_32_bytes!!").unwrap());
        let claims =
            Claims::for_identity("user123", "alice@x.com", Utc::now(), Duration::hours(4)).unwrap();
        let token = other.encode(&claims).unwrap();

        assert!(matches!(
            fixture.verifier.verify(Some(&token)),
            Err(AuthError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let fixture = fixture();
        assert!(matches!(
            fixture.verifier.verify(Some("abc.def.ghi")),
            Err(AuthError::Malformed(_))
        ));
    }

    #[test]
    fn test_revoked_token() {
        let fixture = fixture();
        let (token, claims) = token_for(&fixture, Duration::hours(4));

        fixture.verifier.revoke(&claims);
        assert_eq!(fixture.verifier.verify(Some(&token)), Err(AuthError::Revoked));

        let (fresh, _) = token_for(&fixture, Duration::hours(4));
        assert!(fixture.verifier.verify(Some(&fresh)).is_ok());
    }
}
