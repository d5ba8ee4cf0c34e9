use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered guest or staff member. The password hash never
/// leaves the service; HTTP responses are built from dedicated DTOs.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl auth::Identity for User {
    fn reference(&self) -> String {
        self.id.to_string()
    }

    fn contact(&self) -> &str {
        self.email.as_str()
    }

    fn secret_hash(&self) -> &str {
        &self.password_hash
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name of a user.
///
/// Must be at least 2 characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MIN_LENGTH: usize = 2;

    /// Validate a first name.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 2 characters
    pub fn first_name(name: String) -> Result<Self, NameError> {
        Self::parse("firstName", name)
    }

    /// Validate a last name.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 2 characters
    pub fn last_name(name: String) -> Result<Self, NameError> {
        Self::parse("lastName", name)
    }

    fn parse(field: &'static str, name: String) -> Result<Self, NameError> {
        let actual = name.trim().chars().count();
        if actual < Self::MIN_LENGTH {
            return Err(NameError::TooShort {
                field,
                min: Self::MIN_LENGTH,
                actual,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the length policy.
///
/// Only lives long enough to be hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 7;

    /// # Errors
    /// * `TooShort` - Fewer than 7 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `first_name` - Validated first name
    /// * `last_name` - Validated last name
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
        password: Password,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password,
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates. The email is the
/// login key and cannot be changed.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub password: Option<Password>,
}
