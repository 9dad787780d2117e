use std::sync::Arc;
use uuid::Uuid;

use crate::domain::audit::{AuditError, AuditLog, AuditService};

const INVOICE_ENTITY: &str = "Invoice";

pub struct GetInvoiceAuditTrailUseCase {
  audit_service: Arc<AuditService>,
}

impl GetInvoiceAuditTrailUseCase {
  pub fn new(audit_service: Arc<AuditService>) -> Self {
    Self { audit_service }
  }

  /// Audit events for the invoice, newest first
  pub async fn execute(&self, invoice_id: Uuid) -> Result<Vec<AuditLog>, AuditError> {
    self
      .audit_service
      .get_audit_trail(INVOICE_ENTITY, invoice_id)
      .await
  }
}
