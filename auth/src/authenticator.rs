use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::errors::AuthError;
use crate::issuer::IssuedToken;
use crate::issuer::TokenIssuer;
use crate::issuer::DEFAULT_TOKEN_LIFETIME_HOURS;
use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::jwt::SigningKey;
use crate::password::HashingCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::revocation::RevocationList;
use crate::store::CredentialStore;
use crate::store::Identity;
use crate::verifier::TokenVerifier;

/// Tunables for an [`Authenticator`].
#[derive(Clone)]
pub struct AuthSettings {
    pub token_lifetime: Duration,
    pub leeway_seconds: i64,
    pub cost: HashingCost,
    pub clock: Arc<dyn Clock>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_lifetime: Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
            leeway_seconds: 0,
            cost: HashingCost::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct Login<I> {
    /// The resolved identity
    pub identity: I,
    /// JWT access token and its claims
    pub token: IssuedToken,
}

/// Authentication coordinator combining password verification, token
/// issuance and token verification.
///
/// Holds the signing key for the life of the process; nothing here re-reads
/// configuration per call.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    dummy_hash: String,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `signing_key` - Secret key for JWT signing
    /// * `settings` - Token lifetime, leeway, hashing cost and clock
    ///
    /// # Errors
    /// * `Hashing` - The hashing cost is invalid
    /// * `Signing` - The token lifetime is not positive
    pub fn new(signing_key: &SigningKey, settings: AuthSettings) -> Result<Self, AuthError> {
        let password_hasher = PasswordHasher::with_cost(settings.cost)?;
        let handler = Arc::new(JwtHandler::new(signing_key));

        let issuer = TokenIssuer::new(
            Arc::clone(&handler),
            settings.token_lifetime,
            Arc::clone(&settings.clock),
        )?;
        let verifier = TokenVerifier::new(
            handler,
            settings.clock,
            Arc::new(RevocationList::new()),
        )
        .with_leeway(settings.leeway_seconds);

        // Verified against when the identifier is unknown so both paths cost one hash
        let dummy_hash = password_hasher.hash("not-a-real-password")?;

        Ok(Self {
            password_hasher,
            issuer,
            verifier,
            dummy_hash,
        })
    }

    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate a JWT token.
    ///
    /// # Arguments
    /// * `store` - Credential store to resolve the identifier with
    /// * `identifier` - Login identifier (email)
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// The identity and a freshly issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password
    /// * `Hashing` - Stored hash is unreadable
    /// * `Signing` - Token generation failed
    /// * `Store` - Credential store lookup failed
    pub async fn login<S: CredentialStore>(
        &self,
        store: &S,
        identifier: &str,
        password: &str,
    ) -> Result<Login<S::Identity>, AuthError> {
        let Some(identity) = store.find_by_identifier(identifier).await? else {
            let _ = self.password_hasher.verify(password, &self.dummy_hash);
            tracing::info!(reason = "unknown identifier", "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify(password, identity.secret_hash())?
        {
            tracing::info!(
                sub = %identity.reference(),
                reason = "password mismatch",
                "Login rejected"
            );
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(&identity)?;

        Ok(Login { identity, token })
    }

    /// Generate a JWT token without password verification.
    ///
    /// # Errors
    /// * `Signing` - Token generation failed
    pub fn issue_token<I: Identity>(&self, identity: &I) -> Result<IssuedToken, AuthError> {
        self.issuer
            .issue(&identity.reference(), identity.contact())
            .map_err(AuthError::Signing)
    }

    /// Validate a presented token.
    ///
    /// # Errors
    /// * `MissingToken`, `InvalidSignature`, `Malformed`, `Expired`, `Revoked`
    pub fn authenticate(&self, raw: Option<&str>) -> Result<Claims, AuthError> {
        self.verifier.verify(raw)
    }

    /// Invalidate a token before its expiry.
    pub fn revoke(&self, claims: &Claims) {
        self.verifier.revoke(claims);
    }
}
