use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::domain::audit::{AuditError, InvoiceHistory, InvoiceHistoryRepository};

const HISTORY_COLUMNS: &str = "id, invoice_id, version, fiscal_folio, invoice_number, \
  invoice_data, created_by, created_at, is_reverted";

#[derive(Debug, FromRow)]
struct InvoiceHistoryRow {
  id: Uuid,
  invoice_id: Uuid,
  version: i32,
  fiscal_folio: Option<String>,
  invoice_number: Option<String>,
  invoice_data: Value,
  created_by: Uuid,
  created_at: DateTime<Utc>,
  is_reverted: bool,
}

impl From<InvoiceHistoryRow> for InvoiceHistory {
  fn from(row: InvoiceHistoryRow) -> Self {
    InvoiceHistory {
      id: row.id,
      invoice_id: row.invoice_id,
      version: row.version,
      fiscal_folio: row.fiscal_folio,
      invoice_number: row.invoice_number,
      invoice_data: row.invoice_data,
      created_by: row.created_by,
      created_at: row.created_at,
      is_reverted: row.is_reverted,
    }
  }
}

pub struct PostgresInvoiceHistoryRepository {
  pool: PgPool,
}

impl PostgresInvoiceHistoryRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

pub(super) async fn insert<'e, E>(executor: E, history: &InvoiceHistory) -> Result<(), sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let sql = format!(
    r#"
    INSERT INTO invoice_history ({})
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    "#,
    HISTORY_COLUMNS
  );

  sqlx::query(&sql)
    .bind(history.id)
    .bind(history.invoice_id)
    .bind(history.version)
    .bind(&history.fiscal_folio)
    .bind(&history.invoice_number)
    .bind(&history.invoice_data)
    .bind(history.created_by)
    .bind(history.created_at)
    .bind(history.is_reverted)
    .execute(executor)
    .await?;

  Ok(())
}

#[async_trait]
impl InvoiceHistoryRepository for PostgresInvoiceHistoryRepository {
  async fn create(&self, history: InvoiceHistory) -> Result<InvoiceHistory, AuditError> {
    insert(&self.pool, &history).await?;
    Ok(history)
  }

  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<InvoiceHistory>, AuditError> {
    let sql = format!(
      "SELECT {} FROM invoice_history WHERE invoice_id = $1 ORDER BY version ASC",
      HISTORY_COLUMNS
    );
    let rows = sqlx::query_as::<_, InvoiceHistoryRow>(&sql)
      .bind(invoice_id)
      .fetch_all(&self.pool)
      .await?;

    Ok(rows.into_iter().map(InvoiceHistory::from).collect())
  }

  async fn find_by_invoice_id_and_version(
    &self,
    invoice_id: Uuid,
    version: i32,
  ) -> Result<Option<InvoiceHistory>, AuditError> {
    let sql = format!(
      "SELECT {} FROM invoice_history WHERE invoice_id = $1 AND version = $2 \
       ORDER BY created_at DESC LIMIT 1",
      HISTORY_COLUMNS
    );
    let row = sqlx::query_as::<_, InvoiceHistoryRow>(&sql)
      .bind(invoice_id)
      .bind(version)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(InvoiceHistory::from))
  }
}
