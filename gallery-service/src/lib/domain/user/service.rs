use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::Authenticated;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Registration and credential authentication. Argon2 work runs on the
/// blocking thread pool so one expensive hash never stalls other requests
/// on the async dispatch path.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password.into_inner();

        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Authenticated, UserError> {
        // Unknown email and wrong password must be indistinguishable to the
        // caller.
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::AuthenticationFailed)?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let subject = user.id.to_string();

        let token = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, subject)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => UserError::AuthenticationFailed,
            auth::AuthenticationError::Token(err) => {
                UserError::Unknown(format!("Token issuance failed: {}", err))
            }
        })?;

        Ok(Authenticated { user, token })
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        }
    }

    fn test_authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes",
        ))
    }

    fn stored_user(authenticator: &Authenticator, email: &str, password: &str) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let command = CreateUserCommand {
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: Password::new("StrongPass123#".to_string()).unwrap(),
        };

        let result = service.create_user(command).await;
        assert!(result.is_ok());

        let user = result.unwrap();
        assert_eq!(user.email.as_str(), "test@example.com");
        // The plaintext never reaches the repository
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let command = CreateUserCommand {
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: Password::new("StrongPass123#".to_string()).unwrap(),
        };

        let result = service.create_user(command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let authenticator = test_authenticator();
        let user = stored_user(&authenticator, "test@example.com", "StrongPass123#");
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        let returned_user = user.clone();
        repository
            .expect_find_by_email()
            .withf(|email| email == "test@example.com")
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let authenticated = service
            .authenticate("test@example.com", "StrongPass123#")
            .await
            .expect("Authentication failed");

        assert_eq!(authenticated.user.id, user_id);
        assert_eq!(authenticated.token.claims.sub, user_id.to_string());

        // The minted token round-trips through full verification
        let claims = authenticator
            .verify_token(&authenticated.token.access_token)
            .expect("Token verification failed");
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let result = service.authenticate("ghost@example.com", "StrongPass123#").await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::AuthenticationFailed
        ));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let authenticator = test_authenticator();
        let user = stored_user(&authenticator, "test@example.com", "StrongPass123#");

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator);

        // Identical outcome to the unknown-email case
        let result = service.authenticate("test@example.com", "WrongPass123#").await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::AuthenticationFailed
        ));
    }
}
