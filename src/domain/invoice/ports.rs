use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Invoice, InvoiceItem, InvoiceShipment};
use super::errors::InvoiceError;
use super::value_objects::InvoiceStatus;
use crate::domain::audit::{AuditLog, InvoiceHistory};

/// Reads invoice headers. Items and shipment links have their own repositories.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;

  /// Newest first
  async fn find_by_status(&self, status: InvoiceStatus) -> Result<Vec<Invoice>, InvoiceError>;

  /// Newest first
  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError>;
}

#[async_trait]
pub trait InvoiceItemRepository: Send + Sync {
  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<InvoiceItem>, InvoiceError>;
}

#[async_trait]
pub trait InvoiceShipmentRepository: Send + Sync {
  async fn find_by_invoice_id(
    &self,
    invoice_id: Uuid,
  ) -> Result<Vec<InvoiceShipment>, InvoiceError>;
  async fn find_by_shipment_id(
    &self,
    shipment_id: Uuid,
  ) -> Result<Option<InvoiceShipment>, InvoiceError>;
}

/// Writes an invoice together with the audit rows describing the change.
///
/// Each call commits every row it was given or none of them.
#[async_trait]
pub trait InvoiceUnitOfWork: Send + Sync {
  /// Inserts the header, its items and shipment links, and the audit entry
  async fn create(&self, invoice: &Invoice, audit: AuditLog) -> Result<(), InvoiceError>;

  /// Writes the header only if the stored version still equals `expected_version`,
  /// then replaces items and shipment links with the ones on `invoice`.
  ///
  /// Fails with `InvoiceError::VersionConflict` when the version moved and
  /// `InvoiceError::InvoiceNotFound` when the row is gone.
  async fn update(
    &self,
    invoice: &Invoice,
    expected_version: i32,
    history: InvoiceHistory,
    audit: AuditLog,
  ) -> Result<(), InvoiceError>;

  /// Version-checked header write that leaves items and links untouched
  async fn transition(
    &self,
    invoice: &Invoice,
    expected_version: i32,
    history: InvoiceHistory,
    audit: AuditLog,
  ) -> Result<(), InvoiceError>;
}
