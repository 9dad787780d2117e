use std::sync::Arc;
use uuid::Uuid;

use super::entities::User;
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, TokenService, UserRepository};
use super::value_objects::{AccessToken, Email, FullName, Password, PasswordHash, Username};

/// Authentication service implementing core business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_service: Arc<dyn TokenService>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<dyn TokenService>,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      token_service,
    }
  }

  /// Registers a new user and issues an access token
  ///
  /// # Errors
  /// Returns `AuthError::UsernameAlreadyTaken` if the username exists, then
  /// `AuthError::EmailAlreadyInUse` if the email exists. Both checks run
  /// before anything is persisted.
  pub async fn register(
    &self,
    username: Username,
    email: Email,
    full_name: FullName,
    password: Password,
  ) -> Result<(User, AccessToken), AuthError> {
    if self.user_repo.exists_by_username(username.as_str()).await? {
      return Err(AuthError::UsernameAlreadyTaken);
    }

    if self.user_repo.exists_by_email(email.as_str()).await? {
      return Err(AuthError::EmailAlreadyInUse);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(
      username.into_inner(),
      email.into_inner(),
      full_name.into_inner(),
      password_hash.into_inner(),
    );

    // A concurrent registration can still win the race against the checks above
    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey { constraint })) => {
        return Err(AuthError::from_duplicate_key(&constraint));
      }
      Err(e) => return Err(e),
    };

    let token = self.token_service.issue(&created_user.username).await?;

    tracing::info!(user_id = %created_user.id, username = %created_user.username, "User registered");

    Ok((created_user, token))
  }

  /// Authenticates by username or email and issues an access token
  ///
  /// Unknown users, inactive accounts and wrong passwords all yield
  /// `AuthError::InvalidCredentials`.
  pub async fn login(
    &self,
    username_or_email: &str,
    password: Password,
  ) -> Result<(User, AccessToken), AuthError> {
    let identifier = username_or_email.trim();

    let user = self
      .user_repo
      .find_by_username_or_email(identifier)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    if !user.is_active {
      tracing::warn!(user_id = %user.id, "Login attempt for inactive user");
      return Err(AuthError::InvalidCredentials);
    }

    let password_hash = PasswordHash::from_hash(user.password_hash.clone())?;

    if !self.password_hasher.verify(&password, &password_hash).await? {
      tracing::warn!(user_id = %user.id, "Login failed: wrong password");
      return Err(AuthError::InvalidCredentials);
    }

    let token = self.token_service.issue(&user.username).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((user, token))
  }

  /// Resolves the user behind a bearer token
  ///
  /// The token must carry a valid signature, must not be expired, and its
  /// subject must match the username of an active account.
  pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
    let claims = self
      .token_service
      .verify(token)
      .await
      .map_err(|_| AuthError::InvalidToken)?;

    let user = self
      .user_repo
      .find_by_username(&claims.subject)
      .await?
      .ok_or(AuthError::InvalidToken)?;

    if user.username != claims.subject || !user.is_active {
      return Err(AuthError::InvalidToken);
    }

    Ok(user)
  }

  /// Returns whether the token is currently valid; never fails
  pub async fn validate_token(&self, token: &str) -> bool {
    match self.authenticate(token).await {
      Ok(_) => true,
      Err(e) => {
        tracing::debug!("Token validation failed: {}", e);
        false
      }
    }
  }

  /// Looks up the profile of the given username
  pub async fn get_current_user(&self, username: &str) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_username(username)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
    self.user_repo.find_all().await
  }

  pub async fn get_user(&self, id: Uuid) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_id(id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  /// Updates name and email of the acting user's own account
  pub async fn update_user(
    &self,
    actor_id: Uuid,
    id: Uuid,
    full_name: FullName,
    email: Email,
  ) -> Result<User, AuthError> {
    let mut user = self.get_user(id).await?;

    if actor_id != id {
      return Err(AuthError::Forbidden(
        "Users can only update their own profile".to_string(),
      ));
    }

    if user.email != email.as_str() && self.user_repo.exists_by_email(email.as_str()).await? {
      return Err(AuthError::EmailAlreadyInUse);
    }

    user.update_profile(full_name.into_inner(), email.into_inner());

    match self.user_repo.update(user).await {
      Ok(user) => Ok(user),
      Err(AuthError::Repository(RepositoryError::DuplicateKey { constraint })) => {
        Err(AuthError::from_duplicate_key(&constraint))
      }
      Err(e) => Err(e),
    }
  }

  /// Deletes the acting user's own account
  pub async fn delete_user(&self, actor_id: Uuid, id: Uuid) -> Result<(), AuthError> {
    let user = self.get_user(id).await?;

    if actor_id != user.id {
      return Err(AuthError::Forbidden(
        "Users can only delete their own account".to_string(),
      ));
    }

    self.user_repo.delete(user.id).await?;

    tracing::info!(user_id = %user.id, "User deleted");

    Ok(())
  }
}
