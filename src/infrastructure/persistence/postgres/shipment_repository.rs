use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::shipment::{Shipment, ShipmentError, ShipmentRepository};

#[derive(Debug, FromRow)]
struct ShipmentRow {
  id: Uuid,
  tracking_number: String,
  description: Option<String>,
  created_at: DateTime<Utc>,
}

impl From<ShipmentRow> for Shipment {
  fn from(row: ShipmentRow) -> Self {
    Shipment {
      id: row.id,
      tracking_number: row.tracking_number,
      description: row.description,
      created_at: row.created_at,
    }
  }
}

/// Read-only lookups into the shipments table
pub struct PostgresShipmentRepository {
  pool: PgPool,
}

impl PostgresShipmentRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ShipmentRepository for PostgresShipmentRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Shipment>, ShipmentError> {
    let row = sqlx::query_as::<_, ShipmentRow>(
      "SELECT id, tracking_number, description, created_at FROM shipments WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Shipment::from))
  }
}
