use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

pub struct DeleteUserUseCase {
  auth_service: Arc<AuthService>,
}

impl DeleteUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, actor_id: Uuid, user_id: Uuid) -> Result<(), AuthError> {
    self.auth_service.delete_user(actor_id, user_id).await
  }
}
