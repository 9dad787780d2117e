use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgExecutor, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::audit::{AuditAction, AuditError, AuditLog, AuditLogRepository};

#[derive(Debug, FromRow)]
struct AuditLogRow {
  id: Uuid,
  entity_type: String,
  entity_id: Uuid,
  action: String,
  user_id: Uuid,
  old_value: Option<Value>,
  new_value: Option<Value>,
  summary: String,
  created_at: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLog {
  type Error = AuditError;

  fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
    Ok(AuditLog {
      id: row.id,
      entity_type: row.entity_type,
      entity_id: row.entity_id,
      action: AuditAction::from_str(&row.action)?,
      user_id: row.user_id,
      old_value: row.old_value,
      new_value: row.new_value,
      summary: row.summary,
      created_at: row.created_at,
    })
  }
}

pub struct PostgresAuditLogRepository {
  pool: PgPool,
}

impl PostgresAuditLogRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

pub(super) async fn insert<'e, E>(executor: E, entry: &AuditLog) -> Result<(), sqlx::Error>
where
  E: PgExecutor<'e>,
{
  sqlx::query(
    r#"
    INSERT INTO audit_log (
        id, entity_type, entity_id, action, user_id,
        old_value, new_value, summary, created_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    "#,
  )
  .bind(entry.id)
  .bind(&entry.entity_type)
  .bind(entry.entity_id)
  .bind(entry.action.as_str())
  .bind(entry.user_id)
  .bind(&entry.old_value)
  .bind(&entry.new_value)
  .bind(&entry.summary)
  .bind(entry.created_at)
  .execute(executor)
  .await?;

  Ok(())
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
  async fn create(&self, entry: AuditLog) -> Result<AuditLog, AuditError> {
    insert(&self.pool, &entry).await?;
    Ok(entry)
  }

  async fn find_by_entity(
    &self,
    entity_type: &str,
    entity_id: Uuid,
  ) -> Result<Vec<AuditLog>, AuditError> {
    let rows = sqlx::query_as::<_, AuditLogRow>(
      r#"
      SELECT id, entity_type, entity_id, action, user_id,
             old_value, new_value, summary, created_at
      FROM audit_log
      WHERE entity_type = $1 AND entity_id = $2
      ORDER BY created_at DESC
      "#,
    )
    .bind(entity_type)
    .bind(entity_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(AuditLog::try_from).collect()
  }
}
