use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("Username is already taken!")]
  UsernameAlreadyTaken,

  #[error("Email is already in use!")]
  EmailAlreadyInUse,

  #[error("User not found")]
  UserNotFound,

  #[error("Invalid or expired token")]
  InvalidToken,

  #[error("Operation not permitted: {0}")]
  Forbidden(String),

  #[error("Token error: {0}")]
  Token(String),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {constraint}")]
  DuplicateKey { constraint: String },

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey {
            constraint: db_err.constraint().unwrap_or_default().to_string(),
          }
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}

impl AuthError {
  /// Maps a unique violation on the users table to the matching domain error
  pub fn from_duplicate_key(constraint: &str) -> Self {
    if constraint.contains("username") {
      AuthError::UsernameAlreadyTaken
    } else if constraint.contains("email") {
      AuthError::EmailAlreadyInUse
    } else {
      AuthError::Repository(RepositoryError::DuplicateKey {
        constraint: constraint.to_string(),
      })
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_duplicate_key_mapping() {
    assert!(matches!(
      AuthError::from_duplicate_key("users_username_key"),
      AuthError::UsernameAlreadyTaken
    ));
    assert!(matches!(
      AuthError::from_duplicate_key("users_email_key"),
      AuthError::EmailAlreadyInUse
    ));
    assert!(matches!(
      AuthError::from_duplicate_key("users_pkey"),
      AuthError::Repository(RepositoryError::DuplicateKey { .. })
    ));
  }

  #[test]
  fn test_messages() {
    assert_eq!(
      AuthError::UsernameAlreadyTaken.to_string(),
      "Username is already taken!"
    );
    assert_eq!(
      AuthError::EmailAlreadyInUse.to_string(),
      "Email is already in use!"
    );
  }
}
