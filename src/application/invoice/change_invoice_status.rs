use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService, InvoiceStatus};

#[derive(Debug, Clone)]
pub struct ChangeInvoiceStatusCommand {
  pub user_id: Uuid,
  pub invoice_id: Uuid,
  pub new_status: String,
}

/// Moves an invoice to PAID or CANCELLED (or ISSUED) by status name
pub struct ChangeInvoiceStatusUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ChangeInvoiceStatusUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: ChangeInvoiceStatusCommand) -> Result<Invoice, InvoiceError> {
    let new_status = InvoiceStatus::from_str(&command.new_status)?;

    self
      .invoice_service
      .change_invoice_status(command.user_id, command.invoice_id, new_status)
      .await
  }
}
