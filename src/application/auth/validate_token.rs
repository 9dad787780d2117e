use std::sync::Arc;

use crate::domain::auth::services::AuthService;

/// Answers whether a bearer token is currently usable
pub struct ValidateTokenUseCase {
  auth_service: Arc<AuthService>,
}

impl ValidateTokenUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, token: &str) -> bool {
    self.auth_service.validate_token(token.trim()).await
  }
}
