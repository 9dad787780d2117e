use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShipmentError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
