use std::sync::Arc;

use crate::application::auth::UserProfileResponse;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

pub struct ListUsersUseCase {
  auth_service: Arc<AuthService>,
}

impl ListUsersUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// All accounts ordered by username
  pub async fn execute(&self) -> Result<Vec<UserProfileResponse>, AuthError> {
    let users = self.auth_service.list_users().await?;
    Ok(users.into_iter().map(UserProfileResponse::from).collect())
  }
}
