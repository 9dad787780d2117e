use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::invoice::{
  InvoiceShipment, errors::InvoiceError, ports::InvoiceShipmentRepository,
};

const SHIPMENT_UNIQUE_CONSTRAINT: &str = "invoice_shipments_shipment_id_key";

#[derive(Debug, FromRow)]
struct InvoiceShipmentRow {
  id: Uuid,
  invoice_id: Uuid,
  shipment_id: Uuid,
  created_at: DateTime<Utc>,
}

impl From<InvoiceShipmentRow> for InvoiceShipment {
  fn from(row: InvoiceShipmentRow) -> Self {
    InvoiceShipment {
      id: row.id,
      invoice_id: row.invoice_id,
      shipment_id: row.shipment_id,
      created_at: row.created_at,
    }
  }
}

pub struct PostgresInvoiceShipmentRepository {
  pool: PgPool,
}

impl PostgresInvoiceShipmentRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Inserts shipment links. A shipment already linked elsewhere fails with
/// `ShipmentAlreadyLinked`.
pub(super) async fn insert_all(
  conn: &mut PgConnection,
  links: &[InvoiceShipment],
) -> Result<(), InvoiceError> {
  for link in links {
    sqlx::query(
      r#"
      INSERT INTO invoice_shipments (id, invoice_id, shipment_id, created_at)
      VALUES ($1, $2, $3, $4)
      "#,
    )
    .bind(link.id)
    .bind(link.invoice_id)
    .bind(link.shipment_id)
    .bind(link.created_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
      if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(SHIPMENT_UNIQUE_CONSTRAINT) {
          return InvoiceError::ShipmentAlreadyLinked(link.shipment_id);
        }
      }
      InvoiceError::Database(e)
    })?;
  }

  Ok(())
}

pub(super) async fn delete_for_invoice(
  conn: &mut PgConnection,
  invoice_id: Uuid,
) -> Result<(), InvoiceError> {
  sqlx::query("DELETE FROM invoice_shipments WHERE invoice_id = $1")
    .bind(invoice_id)
    .execute(&mut *conn)
    .await?;

  Ok(())
}

#[async_trait]
impl InvoiceShipmentRepository for PostgresInvoiceShipmentRepository {
  async fn find_by_invoice_id(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<InvoiceShipment>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceShipmentRow>(
      r#"
      SELECT id, invoice_id, shipment_id, created_at
      FROM invoice_shipments
      WHERE invoice_id = $1
      ORDER BY created_at
      "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(InvoiceShipment::from).collect())
  }

  async fn find_by_shipment_id(
    &self,
    shipment_id: Uuid,
  ) -> Result<Option<InvoiceShipment>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceShipmentRow>(
      "SELECT id, invoice_id, shipment_id, created_at FROM invoice_shipments WHERE shipment_id = $1",
    )
    .bind(shipment_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(InvoiceShipment::from))
  }
}
