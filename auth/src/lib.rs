//! Authentication core
//!
//! Provides the credential and token lifecycle shared by the HTTP layer:
//! - Password hashing (Argon2id, configurable cost)
//! - HS256 access tokens with strongly typed claims
//! - Token verification with a fixed check order and a deny-list
//! - Login orchestration over a pluggable credential store
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Issue and verify a token
//! ```
//! use auth::{AuthSettings, Authenticator, SigningKey};
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&key, AuthSettings::default()).unwrap();
//!
//! # struct User;
//! # impl auth::Identity for User {
//! #     fn reference(&self) -> String { "user123".to_string() }
//! #     fn contact(&self) -> &str { "alice@x.com" }
//! #     fn secret_hash(&self) -> &str { "" }
//! # }
//! let issued = auth.issue_token(&User).unwrap();
//! let claims = auth.authenticate(Some(&issued.token)).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod clock;
pub mod errors;
pub mod issuer;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod store;
pub mod verifier;

// Re-export commonly used items
pub use authenticator::AuthSettings;
pub use authenticator::Authenticator;
pub use authenticator::Login;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use errors::AuthError;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SigningKey;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use revocation::RevocationList;
pub use store::CredentialStore;
pub use store::Identity;
pub use store::StoreError;
pub use verifier::TokenVerifier;
