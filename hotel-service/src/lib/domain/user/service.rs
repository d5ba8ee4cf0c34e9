use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository + ?Sized,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository + ?Sized,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher configured with the deployment's cost
    pub fn new(repository: Arc<UR>, password_hasher: auth::PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository + ?Sized,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(command.password.as_str())?;

        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(first_name) = command.first_name {
            user.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            user.last_name = last_name;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.password_hasher.hash(new_password.as_str())?;
            tracing::info!(user_id = %user.id, "Password rotated");
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::PersonName;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn hasher() -> auth::PasswordHasher {
        auth::PasswordHasher::with_cost(auth::HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn test_user(id: UserId) -> User {
        User {
            id,
            first_name: PersonName::first_name("Alice".to_string()).unwrap(),
            last_name: PersonName::last_name("Liddell".to_string()).unwrap(),
            email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn create_command() -> CreateUserCommand {
        CreateUserCommand::new(
            PersonName::first_name("Alice".to_string()).unwrap(),
            PersonName::last_name("Liddell".to_string()).unwrap(),
            EmailAddress::new("alice@x.com".to_string()).unwrap(),
            Password::new("secret123".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.first_name.as_str() == "Alice"
                    && user.email.as_str() == "alice@x.com"
                    && user.password_hash.starts_with("$argon2id")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), hasher());

        let user = service.create_user(create_command()).await.unwrap();
        assert_eq!(user.email.as_str(), "alice@x.com");
        assert!(hasher().verify("secret123", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(test_user(UserId::new()))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.create_user(create_command()).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let returned_user = test_user(user_id);
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository), hasher());

        let user = service.get_user(&user_id).await.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.first_name.as_str(), "Alice");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![test_user(UserId::new()), test_user(UserId::new())]));

        let service = UserService::new(Arc::new(repository), hasher());

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_update_user_rotates_password() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let existing_user = test_user(user_id);
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(existing_user.clone())));
        repository
            .expect_update()
            .withf(|user| {
                user.first_name.as_str() == "Alicia"
                    && user.last_name.as_str() == "Liddell"
                    && user.password_hash.starts_with("$argon2id")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), hasher());

        let command = UpdateUserCommand {
            first_name: Some(PersonName::first_name("Alicia".to_string()).unwrap()),
            last_name: None,
            password: Some(Password::new("newpassword".to_string()).unwrap()),
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert!(hasher()
            .verify("newpassword", &updated.password_hash)
            .unwrap());
        assert_eq!(updated.email.as_str(), "alice@x.com");
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service
            .update_user(&UserId::new(), UpdateUserCommand::default())
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Err(UserError::NotFound(user_id.to_string())));

        let service = UserService::new(Arc::new(repository), hasher());

        let result = service.delete_user(&user_id).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
