use thiserror::Error;
use uuid::Uuid;

use super::value_objects::{InvoiceStatus, ValueObjectError};
use crate::domain::shipment::ShipmentError;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Shipment not found: {0}")]
  ShipmentNotFound(Uuid),

  #[error("Shipment {0} is already linked to an invoice")]
  ShipmentAlreadyLinked(Uuid),

  #[error("Cannot edit invoice: {0}")]
  CannotEditInvoice(String),

  #[error("Cannot issue invoice: {0}")]
  CannotIssueInvoice(String),

  #[error("Invalid status transition from {from} to {to}")]
  InvalidStatusTransition {
    from: InvoiceStatus,
    to: InvoiceStatus,
  },

  #[error("Invoice was modified concurrently: expected version {expected}, found {actual}")]
  VersionConflict { expected: i32, actual: i32 },

  #[error("Shipment lookup failed: {0}")]
  Shipment(#[from] ShipmentError),

  #[error("Snapshot serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

/// Coarse classification used when reporting errors to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceErrorKind {
  NotFound,
  Business,
  Internal,
}

impl InvoiceError {
  pub fn kind(&self) -> InvoiceErrorKind {
    match self {
      InvoiceError::InvoiceNotFound(_) | InvoiceError::ShipmentNotFound(_) => {
        InvoiceErrorKind::NotFound
      }
      InvoiceError::Validation(_)
      | InvoiceError::ShipmentAlreadyLinked(_)
      | InvoiceError::CannotEditInvoice(_)
      | InvoiceError::CannotIssueInvoice(_)
      | InvoiceError::InvalidStatusTransition { .. }
      | InvoiceError::VersionConflict { .. } => InvoiceErrorKind::Business,
      InvoiceError::Shipment(_)
      | InvoiceError::Serialization(_)
      | InvoiceError::Database(_) => InvoiceErrorKind::Internal,
    }
  }
}
