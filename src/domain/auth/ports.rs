use async_trait::async_trait;
use uuid::Uuid;

use super::entities::User;
use super::errors::AuthError;
use super::value_objects::{AccessToken, Password, PasswordHash, TokenClaims};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Finds a user by username
  async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

  /// Finds a user whose username or email matches the given identifier
  async fn find_by_username_or_email(&self, identifier: &str) -> Result<Option<User>, AuthError>;

  async fn exists_by_username(&self, username: &str) -> Result<bool, AuthError>;

  async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError>;

  /// Lists every user ordered by username
  async fn find_all(&self) -> Result<Vec<User>, AuthError>;

  /// Updates an existing user
  async fn update(&self, user: User) -> Result<User, AuthError>;

  /// Removes a user permanently
  async fn delete(&self, id: Uuid) -> Result<(), AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

/// Service trait for signed access token handling
#[async_trait]
pub trait TokenService: Send + Sync {
  /// Issues a token whose subject is the given username
  async fn issue(&self, username: &str) -> Result<AccessToken, AuthError>;

  /// Verifies signature and expiry, returning the embedded claims
  async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
