use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::invoice::{InvoiceItem, errors::InvoiceError, ports::InvoiceItemRepository};

#[derive(Debug, FromRow)]
struct InvoiceItemRow {
  id: Uuid,
  invoice_id: Uuid,
  shipment_id: Option<Uuid>,
  description: String,
  quantity: Option<i32>,
  unit_price: Option<Decimal>,
  total_price: Option<Decimal>,
  created_at: DateTime<Utc>,
}

impl From<InvoiceItemRow> for InvoiceItem {
  fn from(row: InvoiceItemRow) -> Self {
    InvoiceItem {
      id: row.id,
      invoice_id: row.invoice_id,
      shipment_id: row.shipment_id,
      description: row.description,
      quantity: row.quantity,
      unit_price: row.unit_price,
      total_price: row.total_price,
      created_at: row.created_at,
    }
  }
}

pub struct PostgresInvoiceItemRepository {
  pool: PgPool,
}

impl PostgresInvoiceItemRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Inserts the items of one invoice, keeping their order in `position`
pub(super) async fn insert_all(
  conn: &mut PgConnection,
  items: &[InvoiceItem],
) -> Result<(), InvoiceError> {
  for (position, item) in items.iter().enumerate() {
    sqlx::query(
      r#"
      INSERT INTO invoice_items (
          id, invoice_id, shipment_id, description, quantity,
          unit_price, total_price, position, created_at
      )
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
      "#,
    )
    .bind(item.id)
    .bind(item.invoice_id)
    .bind(item.shipment_id)
    .bind(&item.description)
    .bind(item.quantity)
    .bind(item.unit_price)
    .bind(item.total_price)
    .bind(position as i32)
    .bind(item.created_at)
    .execute(&mut *conn)
    .await?;
  }

  Ok(())
}

pub(super) async fn delete_for_invoice(
  conn: &mut PgConnection,
  invoice_id: Uuid,
) -> Result<(), InvoiceError> {
  sqlx::query("DELETE FROM invoice_items WHERE invoice_id = $1")
    .bind(invoice_id)
    .execute(&mut *conn)
    .await?;

  Ok(())
}

#[async_trait]
impl InvoiceItemRepository for PostgresInvoiceItemRepository {
  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<InvoiceItem>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceItemRow>(
      r#"
      SELECT id, invoice_id, shipment_id, description, quantity,
             unit_price, total_price, created_at
      FROM invoice_items
      WHERE invoice_id = $1
      ORDER BY position
      "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(InvoiceItem::from).collect())
  }
}
