use std::sync::Arc;
use uuid::Uuid;

use crate::application::auth::UserProfileResponse;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, FullName};

#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
  /// The authenticated caller
  pub actor_id: Uuid,
  pub user_id: Uuid,
  pub full_name: String,
  pub email: String,
}

pub struct UpdateUserUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdateUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// `UserNotFound`, `Forbidden` when the caller edits someone else,
  /// `EmailAlreadyInUse` when the new email belongs to another account.
  pub async fn execute(&self, command: UpdateUserCommand) -> Result<UserProfileResponse, AuthError> {
    let full_name = FullName::new(command.full_name)?;
    let email = Email::new(command.email)?;

    let user = self
      .auth_service
      .update_user(command.actor_id, command.user_id, full_name, email)
      .await?;

    Ok(user.into())
  }
}
