use std::sync::Arc;
use uuid::Uuid;

use crate::domain::audit::{AuditError, AuditService, InvoiceHistory};

pub struct GetInvoiceHistoryUseCase {
  audit_service: Arc<AuditService>,
}

impl GetInvoiceHistoryUseCase {
  pub fn new(audit_service: Arc<AuditService>) -> Self {
    Self { audit_service }
  }

  /// Every recorded snapshot of the invoice, oldest version first
  pub async fn execute(&self, invoice_id: Uuid) -> Result<Vec<InvoiceHistory>, AuditError> {
    self.audit_service.get_invoice_history(invoice_id).await
  }
}
