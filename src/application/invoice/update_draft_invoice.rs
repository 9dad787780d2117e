use std::sync::Arc;
use uuid::Uuid;

use super::create_draft_invoice::InvoiceInput;
use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService, InvoiceUpdateData};

#[derive(Debug, Clone)]
pub struct UpdateDraftInvoiceCommand {
  pub user_id: Uuid,
  pub invoice_id: Uuid,
  /// Version the caller last read
  pub version: i32,
  pub invoice: InvoiceInput,
}

pub struct UpdateDraftInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateDraftInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: UpdateDraftInvoiceCommand) -> Result<Invoice, InvoiceError> {
    let data = InvoiceUpdateData {
      version: command.version,
      invoice: command.invoice.into_data()?,
    };

    self
      .invoice_service
      .update_draft_invoice(command.user_id, command.invoice_id, data)
      .await
  }
}
