use std::sync::Arc;
use uuid::Uuid;

use crate::domain::audit::{AuditError, AuditService, InvoiceHistory};

pub struct GetInvoiceHistoryVersionUseCase {
  audit_service: Arc<AuditService>,
}

impl GetInvoiceHistoryVersionUseCase {
  pub fn new(audit_service: Arc<AuditService>) -> Self {
    Self { audit_service }
  }

  /// `None` when no snapshot was recorded for that version
  pub async fn execute(
    &self,
    invoice_id: Uuid,
    version: i32,
  ) -> Result<Option<InvoiceHistory>, AuditError> {
    self
      .audit_service
      .get_invoice_history_version(invoice_id, version)
      .await
  }
}
