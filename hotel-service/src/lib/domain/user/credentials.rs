use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Credential store backed by the user repository.
///
/// Resolves login identifiers (emails) and token subjects (user ids) for the
/// authentication core.
pub struct UserCredentialStore {
    repository: Arc<dyn UserRepository>,
}

impl UserCredentialStore {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl auth::CredentialStore for UserCredentialStore {
    type Identity = User;

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, auth::StoreError> {
        self.repository
            .find_by_email(identifier)
            .await
            .map_err(into_store_error)
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<User>, auth::StoreError> {
        // A subject that is not a user id cannot name an existing user
        let Ok(user_id) = UserId::from_string(reference) else {
            return Ok(None);
        };

        self.repository
            .find_by_id(&user_id)
            .await
            .map_err(into_store_error)
    }
}

fn into_store_error(err: UserError) -> auth::StoreError {
    auth::StoreError(err.to_string())
}

#[cfg(test)]
mod tests {
    use auth::CredentialStore;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
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

    fn alice() -> User {
        User {
            id: UserId::new(),
            first_name: PersonName::first_name("Alice".to_string()).unwrap(),
            last_name: PersonName::last_name("Liddell".to_string()).unwrap(),
            email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_by_identifier_uses_email() {
        let mut repository = MockTestUserRepository::new();
        let user = alice();
        let expected_id = user.id;

        repository
            .expect_find_by_email()
            .withf(|email| email == "alice@x.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let store = UserCredentialStore::new(Arc::new(repository));

        let found = store.find_by_identifier("alice@x.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(expected_id));
    }

    #[tokio::test]
    async fn test_find_by_reference_with_non_uuid_subject() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let store = UserCredentialStore::new(Arc::new(repository));

        assert!(store.find_by_reference("not-a-uuid").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_database_failure_becomes_store_error() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));

        let store = UserCredentialStore::new(Arc::new(repository));

        let err = store.find_by_identifier("alice@x.com").await.unwrap_err();
        assert!(err.0.contains("connection refused"));
    }
}
