use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService};

pub struct GetInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Invoice with its items and shipment links
  pub async fn execute(&self, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self.invoice_service.get_invoice_by_id(invoice_id).await
  }
}
