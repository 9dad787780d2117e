use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Public view of an account, also used by the user management use cases
#[derive(Debug, Clone)]
pub struct UserProfileResponse {
  pub user_id: Uuid,
  pub username: String,
  pub email: String,
  pub full_name: String,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfileResponse {
  fn from(user: User) -> Self {
    Self {
      user_id: user.id,
      username: user.username,
      email: user.email,
      full_name: user.full_name,
      is_active: user.is_active,
      created_at: user.created_at,
      updated_at: user.updated_at,
    }
  }
}

/// Use case for getting the current authenticated user
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Reloads the profile so the response reflects the stored state
  pub async fn execute(&self, username: &str) -> Result<UserProfileResponse, AuthError> {
    let user = self.auth_service.get_current_user(username).await?;
    Ok(user.into())
  }
}
