use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{AccessToken, Email, FullName, Password, Username};
use crate::domain::auth::User;

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub username: String,
  pub email: String,
  pub full_name: String,
  /// Plain text, hashed before it is stored
  pub password: String,
}

/// Token plus identity returned by register and login
#[derive(Debug, Clone)]
pub struct AuthenticatedUserResponse {
  pub user_id: Uuid,
  pub username: String,
  pub email: String,
  pub token: String,
  pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUserResponse {
  pub(super) fn new(user: User, token: AccessToken) -> Self {
    Self {
      user_id: user.id,
      username: user.username,
      email: user.email,
      expires_at: token.expires_at(),
      token: token.into_inner(),
    }
  }
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Validates the command, creates the account and signs a token for it
  ///
  /// # Errors
  /// `AuthError::ValueObject` for malformed input, `UsernameAlreadyTaken` or
  /// `EmailAlreadyInUse` when the identity is not free.
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<AuthenticatedUserResponse, AuthError> {
    let username = Username::new(command.username)?;
    let email = Email::new(command.email)?;
    let full_name = FullName::new(command.full_name)?;
    let password = Password::new(command.password)?;

    let (user, token) = self
      .auth_service
      .register(username, email, full_name, password)
      .await?;

    Ok(AuthenticatedUserResponse::new(user, token))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::ValueObjectError;
  use crate::infrastructure::persistence::memory::InMemoryUserRepository;
  use crate::infrastructure::security::{Argon2PasswordHasher, JwtTokenService};

  fn use_case() -> (RegisterUserUseCase, Arc<InMemoryUserRepository>) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let service = AuthService::new(
      repo.clone(),
      Arc::new(Argon2PasswordHasher::new().unwrap()),
      Arc::new(JwtTokenService::new(b"register-test-key", 3600)),
    );
    (RegisterUserUseCase::new(Arc::new(service)), repo)
  }

  fn command(username: &str, password: &str) -> RegisterUserCommand {
    RegisterUserCommand {
      username: username.to_string(),
      email: format!("{}@example.com", username.trim()),
      full_name: "Jane Doe".to_string(),
      password: password.to_string(),
    }
  }

  #[tokio::test]
  async fn test_register_returns_token_and_identity() {
    let (use_case, repo) = use_case();

    let response = use_case.execute(command("  jane  ", "secret1")).await.unwrap();

    assert_eq!(response.username, "jane");
    assert_eq!(response.email, "jane@example.com");
    assert!(!response.token.is_empty());
    assert_eq!(repo.len(), 1);
  }

  #[tokio::test]
  async fn test_register_rejects_short_password_without_persisting() {
    let (use_case, repo) = use_case();

    let result = use_case.execute(command("jane", "123")).await;

    assert!(matches!(
      result,
      Err(AuthError::ValueObject(ValueObjectError::PasswordTooShort))
    ));
    assert_eq!(repo.len(), 0);
  }
}
