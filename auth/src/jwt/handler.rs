use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;
use super::key::SigningKey;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. Signs with HS256 and accepts nothing else:
/// the algorithm named in a presented token's header is never trusted.
/// Expiry is not judged here; see `TokenVerifier`.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler from a signing key.
    ///
    /// # Arguments
    /// * `key` - Symmetric signing key (should be at least 32 bytes for HS256)
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
        }
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(ALGORITHM);

        let token = encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        if token.is_empty() {
            return Err(JwtError::EncodingFailed("empty token".to_string()));
        }

        Ok(token)
    }

    /// Decode a JWT token and verify its signature.
    ///
    /// # Errors
    /// * `InvalidSignature` - Header names another algorithm, or the
    ///   signature does not match the signing key
    /// * `Malformed` - Token structure or claims cannot be decoded
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        if let Some(alg) = declared_algorithm(token) {
            if alg != "HS256" {
                return Err(JwtError::InvalidSignature(format!(
                    "unexpected algorithm {}",
                    alg
                )));
            }
        }

        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)
    }
}

/// Read the `alg` field of the token header without trusting it.
///
/// Returns `None` when the header cannot be read at all; the decoder then
/// reports the token as malformed.
fn declared_algorithm(token: &str) -> Option<String> {
    let header = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(header).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value.get("alg")?.as_str().map(str::to_owned)
}

fn classify(error: jsonwebtoken::errors::Error) -> JwtError {
    match error.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName => JwtError::InvalidSignature(error.to_string()),
        ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Malformed(error.to_string()),
    }
}
