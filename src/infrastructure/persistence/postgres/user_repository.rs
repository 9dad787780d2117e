use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

const USER_COLUMNS: &str =
  "id, username, email, full_name, password_hash, is_active, created_at, updated_at";

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  username: String,
  email: String,
  full_name: String,
  password_hash: String,
  is_active: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.username,
      row.email,
      row.full_name,
      row.password_hash,
      row.is_active,
      row.created_at,
      row.updated_at,
    )
  }
}

impl PostgresUserRepository {
  async fn find_one(&self, filter: &str, value: &str) -> Result<Option<User>, AuthError> {
    let sql = format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, filter);
    let row = sqlx::query_as::<_, UserRow>(&sql)
      .bind(value)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(User::from))
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let sql = format!(
      r#"
      INSERT INTO users (id, username, email, full_name, password_hash, is_active, created_at, updated_at)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
      RETURNING {}
      "#,
      USER_COLUMNS
    );

    let row = sqlx::query_as::<_, UserRow>(&sql)
      .bind(user.id)
      .bind(&user.username)
      .bind(&user.email)
      .bind(&user.full_name)
      .bind(&user.password_hash)
      .bind(user.is_active)
      .bind(user.created_at)
      .bind(user.updated_at)
      .fetch_one(&self.pool)
      .await?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    let row = sqlx::query_as::<_, UserRow>(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(User::from))
  }

  async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
    self.find_one("username = $1", username).await
  }

  async fn find_by_username_or_email(&self, identifier: &str) -> Result<Option<User>, AuthError> {
    self
      .find_one("username = $1 OR email = LOWER($1) LIMIT 1", identifier)
      .await
  }

  async fn exists_by_username(&self, username: &str) -> Result<bool, AuthError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
      .bind(username)
      .fetch_one(&self.pool)
      .await?;
    Ok(exists)
  }

  async fn exists_by_email(&self, email: &str) -> Result<bool, AuthError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
      .bind(email)
      .fetch_one(&self.pool)
      .await?;
    Ok(exists)
  }

  async fn find_all(&self) -> Result<Vec<User>, AuthError> {
    let sql = format!("SELECT {} FROM users ORDER BY username", USER_COLUMNS);
    let rows = sqlx::query_as::<_, UserRow>(&sql)
      .fetch_all(&self.pool)
      .await?;

    Ok(rows.into_iter().map(User::from).collect())
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let sql = format!(
      r#"
      UPDATE users
      SET email = $2, full_name = $3, password_hash = $4, is_active = $5, updated_at = $6
      WHERE id = $1
      RETURNING {}
      "#,
      USER_COLUMNS
    );

    let result = sqlx::query_as::<_, UserRow>(&sql)
      .bind(user.id)
      .bind(&user.email)
      .bind(&user.full_name)
      .bind(&user.password_hash)
      .bind(user.is_active)
      .bind(user.updated_at)
      .fetch_one(&self.pool)
      .await;

    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::RowNotFound) => Err(AuthError::Repository(RepositoryError::NotFound)),
      Err(e) => Err(e.into()),
    }
  }

  async fn delete(&self, id: Uuid) -> Result<(), AuthError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(AuthError::Repository(RepositoryError::NotFound));
    }

    Ok(())
  }
}
