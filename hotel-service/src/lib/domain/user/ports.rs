use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing names, email, and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Command with optional names and a new password
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Storage for user records.
///
/// Lookups return `Ok(None)` for a missing user; only writes against a
/// missing user fail with `NotFound`. Backend failures surface as
/// `DatabaseError`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a user. Fails with `EmailAlreadyExists` when the email is taken.
    async fn create(&self, user: User) -> Result<User, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Exact, case-sensitive match on the stored email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Every user, newest first.
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Overwrite names and password hash. The email is never changed.
    async fn update(&self, user: User) -> Result<User, UserError>;

    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
