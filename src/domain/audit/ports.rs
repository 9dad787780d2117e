use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{AuditLog, InvoiceHistory};
use super::errors::AuditError;

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
  async fn create(&self, entry: AuditLog) -> Result<AuditLog, AuditError>;

  /// Entries for one entity, newest first
  async fn find_by_entity(
    &self,
    entity_type: &str,
    entity_id: Uuid,
  ) -> Result<Vec<AuditLog>, AuditError>;
}

#[async_trait]
pub trait InvoiceHistoryRepository: Send + Sync {
  async fn create(&self, history: InvoiceHistory) -> Result<InvoiceHistory, AuditError>;

  /// Snapshots for one invoice ordered by version ascending
  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<InvoiceHistory>, AuditError>;

  async fn find_by_invoice_id_and_version(
    &self,
    invoice_id: Uuid,
    version: i32,
  ) -> Result<Option<InvoiceHistory>, AuditError>;
}
