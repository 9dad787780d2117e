use std::sync::Arc;
use uuid::Uuid;

use crate::application::auth::UserProfileResponse;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

pub struct GetUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<UserProfileResponse, AuthError> {
    let user = self.auth_service.get_user(user_id).await?;
    Ok(user.into())
  }
}
