use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService};

pub struct IssueInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl IssueInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, user_id: Uuid, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self.invoice_service.issue_invoice(user_id, invoice_id).await
  }
}
