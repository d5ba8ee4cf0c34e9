use async_trait::async_trait;
use thiserror::Error;

/// A stored identity as seen by the login flow and the gate.
pub trait Identity {
    /// Unique, stable reference written into the token subject.
    fn reference(&self) -> String;

    /// Contact identifier used as the login key.
    fn contact(&self) -> &str;

    /// Stored password hash in PHC string format.
    fn secret_hash(&self) -> &str;
}

/// Transport or backend failure while looking up an identity.
///
/// "Not found" is never reported through this type; lookups return
/// `Ok(None)` for that.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Credential store failure: {0}")]
pub struct StoreError(pub String);

/// Lookup capability the authentication core consumes.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    type Identity: Identity + Send;

    /// Resolve an identity by its login identifier (email).
    ///
    /// # Returns
    /// Optional identity (None if no identity uses this identifier)
    ///
    /// # Errors
    /// * `StoreError` - Backend unavailable or query failed
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Self::Identity>, StoreError>;

    /// Resolve an identity by the reference carried in a token.
    ///
    /// # Returns
    /// Optional identity (None if the identity no longer exists)
    ///
    /// # Errors
    /// * `StoreError` - Backend unavailable or query failed
    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Self::Identity>, StoreError>;
}
