use std::sync::Arc;

use super::register_user::AuthenticatedUserResponse;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Password;

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// Either the username or the email address
  pub username_or_email: String,
  pub password: String,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// `AuthError::InvalidCredentials` for any unknown, inactive or mismatching account
  pub async fn execute(
    &self,
    command: LoginUserCommand,
  ) -> Result<AuthenticatedUserResponse, AuthError> {
    // Registration length rules do not apply to a login attempt
    let password = Password::for_verification(command.password);

    let (user, token) = self
      .auth_service
      .login(&command.username_or_email, password)
      .await?;

    Ok(AuthenticatedUserResponse::new(user, token))
  }
}
