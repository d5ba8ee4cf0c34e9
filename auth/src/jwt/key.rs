use std::fmt;

use super::errors::JwtError;

/// Symmetric secret used to sign and verify tokens.
///
/// Built once at startup from configuration and handed to the issuer and
/// verifier. The bytes are never printed, not even through `Debug`.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wrap a secret.
    ///
    /// # Errors
    /// * `MissingSigningKey` - Secret is empty or whitespace only
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, JwtError> {
        let secret = secret.as_ref();
        if secret.iter().all(u8::is_ascii_whitespace) {
            return Err(JwtError::MissingSigningKey);
        }
        Ok(Self(secret.to_vec()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}
