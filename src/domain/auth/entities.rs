use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account owned by the authentication subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub username: String,
  pub email: String,
  pub full_name: String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new active user
  pub fn new(username: String, email: String, full_name: String, password_hash: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      username,
      email,
      full_name,
      password_hash,
      is_active: true,
      created_at: now,
      updated_at: now,
    }
  }

  /// Reconstructs a user from persisted state
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: Uuid,
    username: String,
    email: String,
    full_name: String,
    password_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      username,
      email,
      full_name,
      password_hash,
      is_active,
      created_at,
      updated_at,
    }
  }

  pub fn update_profile(&mut self, full_name: String, email: String) {
    self.full_name = full_name;
    self.email = email;
    self.updated_at = Utc::now();
  }

  pub fn deactivate(&mut self) {
    self.is_active = false;
    self.updated_at = Utc::now();
  }
}
