use argon2::PasswordHash as Argon2PasswordHash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Username must be between 3 and 50 characters")]
  InvalidUsername,

  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Full name must not exceed 100 characters")]
  FullNameTooLong,

  #[error("Password is too short (minimum 6 characters)")]
  PasswordTooShort,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid token format")]
  InvalidToken,
}

// ============================================================================
// Username Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
  const MIN_LENGTH: usize = 3;
  const MAX_LENGTH: usize = 50;

  /// Creates a new Username after trimming and length validation
  pub fn new(username: impl Into<String>) -> Result<Self, ValueObjectError> {
    let username = username.into().trim().to_string();
    let length = username.chars().count();

    if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
      return Err(ValueObjectError::InvalidUsername);
    }

    Ok(Self(username))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Username {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    // Normalize to lowercase
    Ok(Self(email.to_lowercase()))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// FullName Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName(String);

impl FullName {
  const MAX_LENGTH: usize = 100;

  pub fn new(full_name: impl Into<String>) -> Result<Self, ValueObjectError> {
    let full_name = full_name.into().trim().to_string();

    if full_name.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::FullNameTooLong);
    }

    Ok(Self(full_name))
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain text password, wiped from memory when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 6;
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.len() < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Wraps a login attempt without applying registration length rules
  pub fn for_verification(password: impl Into<String>) -> Self {
    Self(password.into())
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id Hash)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Creates a new PasswordHash from an existing PHC hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  /// Returns the hash as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// Access Token Value Objects
// ============================================================================

/// Signed bearer token handed out on register and login
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
  token: String,
  expires_at: DateTime<Utc>,
}

impl AccessToken {
  pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
    Self {
      token: token.into(),
      expires_at,
    }
  }

  pub fn as_str(&self) -> &str {
    &self.token
  }

  pub fn expires_at(&self) -> DateTime<Utc> {
    self.expires_at
  }

  pub fn into_inner(self) -> String {
    self.token
  }
}

impl fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AccessToken")
      .field("token", &"***")
      .field("expires_at", &self.expires_at)
      .finish()
  }
}

/// Claims extracted from a token whose signature and expiry were verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
  pub subject: String,
  pub issued_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_username_validation() {
    assert!(Username::new("bob").is_ok());
    assert!(Username::new("a".repeat(50)).is_ok());

    assert!(matches!(
      Username::new("ab"),
      Err(ValueObjectError::InvalidUsername)
    ));
    assert!(matches!(
      Username::new("a".repeat(51)),
      Err(ValueObjectError::InvalidUsername)
    ));
  }

  #[test]
  fn test_username_is_trimmed() {
    let username = Username::new("  alice  ").unwrap();
    assert_eq!(username.as_str(), "alice");
  }

  #[test]
  fn test_email_validation() {
    assert!(Email::new("test@example.com").is_ok());
    assert!(Email::new("user.name@domain.co.uk").is_ok());

    assert!(Email::new("invalid").is_err());
    assert!(Email::new("@example.com").is_err());
    assert!(Email::new("test@").is_err());
  }

  #[test]
  fn test_email_normalization() {
    let email = Email::new("Test@Example.COM").unwrap();
    assert_eq!(email.as_str(), "test@example.com");
  }

  #[test]
  fn test_full_name_length() {
    assert!(FullName::new("Ada Lovelace").is_ok());
    assert!(matches!(
      FullName::new("x".repeat(101)),
      Err(ValueObjectError::FullNameTooLong)
    ));
  }

  #[test]
  fn test_password_validation() {
    assert!(Password::new("secret").is_ok());

    assert!(matches!(
      Password::new("short"),
      Err(ValueObjectError::PasswordTooShort)
    ));

    let long_password = "a".repeat(129);
    assert!(matches!(
      Password::new(long_password),
      Err(ValueObjectError::PasswordTooLong)
    ));
  }

  #[test]
  fn test_password_debug_is_masked() {
    let password = Password::new("hunter22").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
  }

  #[test]
  fn test_password_hash_rejects_non_phc_strings() {
    assert!(matches!(
      PasswordHash::from_hash("plaintext"),
      Err(ValueObjectError::InvalidPasswordHash)
    ));
  }
}
